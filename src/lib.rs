// Library exports for testing and embedding the viewer core
//
// Data flow: config -> channels::parse -> LayoutState -> Controller, which
// mounts players through player::PlayerAdapter and projects the page through
// render. Keys and control messages reach the controller via input::InputRouter.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod app;
pub mod channels;
pub mod cli;
pub mod controller;
pub mod input;
pub mod layout;
pub mod player;
pub mod render;
pub mod scheduler;

pub use channels::{StreamDescriptor, StreamKind, StreamSource};
pub use controller::Controller;
pub use layout::{Action, AudioSelector, LayoutState, SlotId};
