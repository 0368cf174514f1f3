//! Typed error variants for the spectate-config crate.
//!
//! `Config::load` and friends return `anyhow::Result` for the application
//! glue; these variants are what sits underneath, so callers can downcast and
//! match on specific failure modes.

use thiserror::Error;

/// Errors that can occur when loading or overriding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A single option value failed validation.
    ///
    /// Carries the option name and the rejected raw value.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },
}
