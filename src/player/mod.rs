//! Embedded players.
//!
//! Providers (Twitch, YouTube) hand out opaque player objects with
//! different mute APIs. [`PlayerAdapter`] owns one per slot, remembers the
//! mute state each slot should have, and applies it once the player reports
//! ready.

mod adapter;
mod headless;
mod slot;

pub use adapter::PlayerAdapter;
pub use headless::HeadlessProvider;
pub use slot::{Placeholder, PlayerSlot, SlotContent};

use crate::channels::{StreamKind, StreamSource};
use crate::layout::SlotId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("{provider} player API is not available: {reason}")]
    Unavailable {
        provider: &'static str,
        reason: String,
    },

    #[error("{0} streams have no player API")]
    Unsupported(StreamKind),

    #[error("player control failed: {0}")]
    Control(String),
}

/// Identifies one mount of one slot. Ready events carry it back so events
/// from a replaced player can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadyToken {
    pub slot: SlotId,
    pub generation: u64,
}

/// Everything a provider needs to create a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Unique id of the element that hosts the player
    pub container_id: String,
    pub source: StreamSource,
    pub autoplay: bool,
    pub start_muted: bool,
    /// Embedding domain, required by Twitch
    pub parent: String,
    /// Token to report once the player is ready
    pub ready: ReadyToken,
}

/// Twitch-style player: one boolean setter.
pub trait TwitchPlayer {
    fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError>;
}

/// YouTube-style player: separate mute and unmute calls.
pub trait YouTubePlayer {
    fn mute(&mut self) -> Result<(), PlayerError>;
    fn unmute(&mut self) -> Result<(), PlayerError>;
}

/// Creates players for a slot's container.
///
/// Implementations report readiness asynchronously by passing
/// `request.ready` back to the controller.
pub trait EmbedProvider {
    fn embed_twitch(&mut self, request: &EmbedRequest)
    -> Result<Box<dyn TwitchPlayer>, PlayerError>;

    fn embed_youtube(&mut self, request: &EmbedRequest)
    -> Result<Box<dyn YouTubePlayer>, PlayerError>;
}

/// A live player of either provider.
pub enum PlayerHandle {
    Twitch(Box<dyn TwitchPlayer>),
    YouTube(Box<dyn YouTubePlayer>),
}

impl PlayerHandle {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Twitch(_) => "twitch",
            Self::YouTube(_) => "youtube",
        }
    }

    /// Set the mute state through whichever API the provider exposes.
    pub fn apply_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
        match self {
            Self::Twitch(player) => player.set_muted(muted),
            Self::YouTube(player) if muted => player.mute(),
            Self::YouTube(player) => player.unmute(),
        }
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlayerHandle({})", self.provider())
    }
}
