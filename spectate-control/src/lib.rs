//! Control channel for the spectate viewer.
//!
//! An external control surface (an operator panel, a stream-deck script, a
//! second window) drives the viewer by publishing small JSON messages of the
//! shape `{"cmd": "...", "arg": "..."}` on a named channel. This crate holds
//! the message types and the in-process hub that delivers them to every
//! subscribed viewer.

mod hub;
mod protocol;

pub use hub::{ControlChannel, ControlHub, ControlReceiver};
pub use protocol::{ControlCommand, ControlMessage};

use thiserror::Error;

/// Errors raised by the control channel.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The environment has no broadcast mechanism.
    #[error("control channel '{0}' is not available in this environment")]
    Unavailable(String),

    /// A message could not be decoded.
    #[error("malformed control message: {0}")]
    Malformed(#[from] serde_json::Error),
}
