//! Layout, focus and audio state machine.
//!
//! [`LayoutState`] is a plain value. [`LayoutState::apply`] computes the next
//! state for an [`Action`] together with the [`Effect`]s the controller has to
//! carry out (mount players, re-apply mute state, start or stop the cycle
//! timer, re-render). Nothing in this module touches players or timers.

mod action;
mod slot;
mod state;
mod transition;

pub use action::{Action, AudioSelector};
pub(crate) use action::parse_position;
pub use slot::SlotId;
pub use state::LayoutState;
pub use transition::{Effect, Transition};
