//! Shared configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keybinding configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyBinding {
    /// Key combination string, e.g., "Shift+Tab" or "Space"
    pub key: String,
    /// Action name, e.g., "swap"
    pub action: String,
}

impl KeyBinding {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Which family of layouts the viewer uses.
///
/// The two-pane family shows the first two streams side by side with one of
/// them emphasised; the grid family tiles every stream and can zoom into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutFamily {
    /// Two panes: modes `focus` and `both`
    #[default]
    Duo,
    /// One tile per stream: modes `grid` and `focus`
    Grid,
}

impl LayoutFamily {
    /// Parse a family name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duo" | "two" | "pair" => Some(Self::Duo),
            "grid" | "multi" => Some(Self::Grid),
            _ => None,
        }
    }

    /// Modes this family can be in. The first entry is the default.
    pub fn modes(self) -> &'static [LayoutMode] {
        match self {
            Self::Duo => &[LayoutMode::Focus, LayoutMode::Both],
            Self::Grid => &[LayoutMode::Grid, LayoutMode::Focus],
        }
    }

    /// Mode used when the configured layout is absent or unrecognised.
    pub fn default_mode(self) -> LayoutMode {
        self.modes()[0]
    }

    pub fn supports(self, mode: LayoutMode) -> bool {
        self.modes().contains(&mode)
    }

    /// Resolve a raw `layout` option against this family.
    ///
    /// Unknown names, and names that belong to the other family, fall back to
    /// [`Self::default_mode`].
    pub fn resolve_mode(self, raw: Option<&str>) -> LayoutMode {
        raw.and_then(LayoutMode::parse)
            .filter(|mode| self.supports(*mode))
            .unwrap_or_else(|| self.default_mode())
    }

    /// The mode a toggle switches to from `mode`.
    pub fn other_mode(self, mode: LayoutMode) -> LayoutMode {
        let modes = self.modes();
        if mode == modes[0] { modes[1] } else { modes[0] }
    }

    /// Maximum number of panes this family lays out, if bounded.
    pub fn pane_limit(self) -> Option<usize> {
        match self {
            Self::Duo => Some(2),
            Self::Grid => None,
        }
    }
}

impl fmt::Display for LayoutFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duo => write!(f, "duo"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

/// Layout mode. Which values are valid depends on the [`LayoutFamily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One stream emphasised (large pane or dedicated focus pane)
    Focus,
    /// Both panes at equal size (two-pane family)
    Both,
    /// Every stream tiled (grid family)
    Grid,
}

impl LayoutMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Some(Self::Focus),
            "both" => Some(Self::Both),
            "grid" => Some(Self::Grid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Both => "both",
            Self::Grid => "grid",
        }
    }

    /// Whether auto-cycling has any visible effect in this mode.
    pub fn supports_cycle(self) -> bool {
        self == Self::Focus
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level configuration for the debug log.
///
/// Environment variable `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Some(Self::Off),
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duo_resolves_modes() {
        assert_eq!(LayoutFamily::Duo.resolve_mode(Some("both")), LayoutMode::Both);
        assert_eq!(LayoutFamily::Duo.resolve_mode(Some("FOCUS")), LayoutMode::Focus);
        assert_eq!(LayoutFamily::Duo.resolve_mode(Some("grid")), LayoutMode::Focus);
        assert_eq!(LayoutFamily::Duo.resolve_mode(Some("nonsense")), LayoutMode::Focus);
        assert_eq!(LayoutFamily::Duo.resolve_mode(None), LayoutMode::Focus);
    }

    #[test]
    fn test_grid_resolves_modes() {
        assert_eq!(LayoutFamily::Grid.resolve_mode(Some("focus")), LayoutMode::Focus);
        assert_eq!(LayoutFamily::Grid.resolve_mode(Some("both")), LayoutMode::Grid);
        assert_eq!(LayoutFamily::Grid.resolve_mode(None), LayoutMode::Grid);
    }

    #[test]
    fn test_other_mode() {
        assert_eq!(
            LayoutFamily::Duo.other_mode(LayoutMode::Focus),
            LayoutMode::Both
        );
        assert_eq!(
            LayoutFamily::Grid.other_mode(LayoutMode::Focus),
            LayoutMode::Grid
        );
    }

    #[test]
    fn test_family_parse() {
        assert_eq!(LayoutFamily::parse("Grid"), Some(LayoutFamily::Grid));
        assert_eq!(LayoutFamily::parse("duo"), Some(LayoutFamily::Duo));
        assert_eq!(LayoutFamily::parse("triple"), None);
    }

    #[test]
    fn test_only_focus_cycles() {
        assert!(LayoutMode::Focus.supports_cycle());
        assert!(!LayoutMode::Both.supports_cycle());
        assert!(!LayoutMode::Grid.supports_cycle());
    }
}
