//! Per-option overrides for `Config`.
//!
//! The viewer page reads its options from the URL query string
//! (`?channels=twitch:a,twitch:b&layout=both&muted=0`). The same names are
//! accepted here, one option at a time, so the query string, CLI flags and
//! YAML file can all be layered over each other.

use super::Config;
use crate::defaults;
use crate::error::ConfigError;
use crate::types::{LayoutFamily, LogLevel};
use std::collections::HashSet;

/// Option names understood by [`Config::set_option`].
pub const OPTION_NAMES: &[&str] = &[
    "channels",
    "family",
    "layout",
    "muted",
    "parent",
    "cycle",
    "start",
    "audio_delay_ms",
    "control_channel",
    "log_level",
];

impl Config {
    /// Set a single option from its raw string value.
    ///
    /// Empty values leave the option untouched. Returns `Ok(false)` for names
    /// that are not configuration options.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<bool, ConfigError> {
        if value.is_empty() {
            return Ok(false);
        }
        let invalid = || ConfigError::InvalidValue {
            option: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "channels" => self.channels = value.to_string(),
            "family" => self.family = LayoutFamily::parse(value).ok_or_else(invalid)?,
            "layout" => self.layout = Some(value.to_ascii_lowercase()),
            // Anything other than "0" keeps the muted default
            "muted" => self.muted = value != "0",
            "parent" => self.parent = Some(value.to_string()),
            "cycle" => {
                self.cycle = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs <= defaults::MAX_CYCLE_SECS)
                    .ok_or_else(invalid)?
            }
            "start" => self.start = value.trim().parse().map_err(|_| invalid())?,
            "audio_delay_ms" => {
                self.audio_delay_ms = value.trim().parse().map_err(|_| invalid())?
            }
            "control_channel" => self.control_channel = value.to_string(),
            "log_level" => self.log_level = LogLevel::parse(value).ok_or_else(invalid)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Apply a URL query string (with or without the leading `?`).
    ///
    /// Only the first occurrence of each name counts. Invalid values are
    /// logged and skipped; the remaining options still apply. Returns the
    /// number of options that were changed.
    pub fn apply_query(&mut self, query: &str) -> usize {
        let query = query.trim().trim_start_matches('?');
        let mut seen = HashSet::new();
        let mut applied = 0;

        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if !seen.insert(name.to_string()) {
                continue;
            }
            match self.set_option(&name, &value) {
                Ok(true) => {
                    log::debug!("Query override: {} = {}", name, value);
                    applied += 1;
                }
                Ok(false) => {
                    if !OPTION_NAMES.contains(&name.as_ref()) {
                        log::debug!("Ignoring unknown query parameter '{}'", name);
                    }
                }
                Err(e) => log::warn!("Ignoring query override: {}", e),
            }
        }

        applied
    }

    /// Builder-style variant of [`Config::apply_query`].
    pub fn with_query(mut self, query: &str) -> Self {
        self.apply_query(query);
        self
    }
}
