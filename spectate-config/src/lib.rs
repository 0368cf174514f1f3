//! Configuration system for the spectate viewer.
//!
//! This crate provides configuration loading, query-string overrides and
//! default values for the viewer. It includes:
//!
//! - The [`Config`] struct and its YAML persistence
//! - Page-style `?channels=..&layout=..` overrides
//! - Layout family / mode types shared with the state machine
//! - Default keybindings per layout family

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{KeyBinding, LayoutFamily, LayoutMode, LogLevel};
