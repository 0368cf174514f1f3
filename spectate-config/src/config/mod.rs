//! Core `Config` struct definition.
//!
//! Sub-modules:
//! - [`overrides`]: page-style query-string and per-option overrides
//! - [`persistence`]: YAML load/save and path resolution
//! - `keybindings_methods`: merging family default keybindings

mod keybindings_methods;
pub mod overrides;
pub mod persistence;

use crate::defaults;
use crate::types::{KeyBinding, LayoutFamily, LayoutMode, LogLevel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Viewer configuration.
///
/// Read once at start. Every field can be set from the YAML file, the query
/// string, or the command line; later layers win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Raw comma-separated channel tokens (`twitch:foo,youtube:video:abc,...`)
    #[serde(default)]
    pub channels: String,

    /// Layout family: `duo` (two panes) or `grid` (one tile per stream)
    #[serde(default)]
    pub family: LayoutFamily,

    /// Initial layout mode name; resolved against `family`
    #[serde(default)]
    pub layout: Option<String>,

    /// Start players muted. Only an explicit `"0"` override disables this.
    #[serde(default = "defaults::bool_true")]
    pub muted: bool,

    /// Allow-listed embedding domain passed to providers that require one
    #[serde(default)]
    pub parent: Option<String>,

    /// Host name of the page itself; used when `parent` is not set
    #[serde(default = "defaults::page_host")]
    pub page_host: String,

    /// Seconds between automatic focus advances (0 disables)
    #[serde(default)]
    pub cycle: u64,

    /// Initial focus index
    #[serde(default)]
    pub start: usize,

    /// Delay before the default audio target is resolved
    #[serde(default = "defaults::audio_delay_ms")]
    pub audio_delay_ms: u64,

    /// Name of the shared control channel
    #[serde(default = "defaults::control_channel")]
    pub control_channel: String,

    /// User keybindings; family defaults fill in unbound actions
    #[serde(default)]
    pub keybindings: Vec<KeyBinding>,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channels: String::new(),
            family: LayoutFamily::default(),
            layout: None,
            muted: defaults::bool_true(),
            parent: None,
            page_host: defaults::page_host(),
            cycle: 0,
            start: 0,
            audio_delay_ms: defaults::audio_delay_ms(),
            control_channel: defaults::control_channel(),
            keybindings: Vec::new(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(mut self, channels: impl Into<String>) -> Self {
        self.channels = channels.into();
        self
    }

    pub fn with_family(mut self, family: LayoutFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_cycle(mut self, seconds: u64) -> Self {
        self.cycle = seconds;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Initial layout mode, falling back to the family default.
    pub fn initial_mode(&self) -> LayoutMode {
        self.family.resolve_mode(self.layout.as_deref())
    }

    /// Embedding domain to hand to providers.
    pub fn effective_parent(&self) -> &str {
        match self.parent.as_deref() {
            Some(parent) if !parent.is_empty() => parent,
            _ => &self.page_host,
        }
    }

    /// Auto-cycle interval, `None` when disabled.
    ///
    /// Values above [`defaults::MAX_CYCLE_SECS`] (e.g. from a YAML file) are
    /// clamped to it.
    pub fn cycle_interval(&self) -> Option<Duration> {
        if self.cycle == 0 {
            return None;
        }
        if self.cycle > defaults::MAX_CYCLE_SECS {
            log::warn!(
                "Auto-cycle interval {}s exceeds {}s, clamping",
                self.cycle,
                defaults::MAX_CYCLE_SECS
            );
        }
        Some(Duration::from_secs(self.cycle.min(defaults::MAX_CYCLE_SECS)))
    }

    pub fn audio_delay(&self) -> Duration {
        Duration::from_millis(self.audio_delay_ms)
    }
}
