//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on `Config`
//! fields and by `impl Default for Config`.

use crate::types::{KeyBinding, LayoutFamily};

pub fn bool_true() -> bool {
    true
}

pub fn page_host() -> String {
    "localhost".to_string()
}

/// Longest accepted auto-cycle interval, in seconds (one day).
pub const MAX_CYCLE_SECS: u64 = 86_400;

/// Grace period before the default audio target is committed, in milliseconds.
pub fn audio_delay_ms() -> u64 {
    750
}

/// Name of the shared control channel external controllers publish on.
pub fn control_channel() -> String {
    "spectate-control".to_string()
}

/// Default keybindings for a layout family.
///
/// Keys use the combo syntax understood by `spectate-keybindings`.
pub fn keybindings(family: LayoutFamily) -> Vec<KeyBinding> {
    match family {
        LayoutFamily::Duo => vec![
            KeyBinding::new("1", "focus_1"),
            KeyBinding::new("2", "focus_2"),
            // Several keys swap; the registry keeps one action per combo
            KeyBinding::new("Space", "swap"),
            KeyBinding::new("Tab", "swap"),
            KeyBinding::new("S", "swap"),
            KeyBinding::new("F", "mode_focus"),
            KeyBinding::new("B", "mode_both"),
            KeyBinding::new("Q", "audio_1"),
            KeyBinding::new("W", "audio_2"),
            KeyBinding::new("0", "mute_all"),
            KeyBinding::new("N", "next"),
            KeyBinding::new("P", "prev"),
            KeyBinding::new("C", "toggle_cycle"),
        ],
        LayoutFamily::Grid => {
            let mut bindings: Vec<KeyBinding> = (1..=9)
                .map(|n| KeyBinding::new(n.to_string(), format!("focus_{n}")))
                .collect();
            bindings.extend([
                KeyBinding::new("G", "mode_grid"),
                KeyBinding::new("F", "mode_focus"),
                KeyBinding::new("Space", "toggle_mode"),
                KeyBinding::new("N", "next"),
                KeyBinding::new("Right", "next"),
                KeyBinding::new("P", "prev"),
                KeyBinding::new("Left", "prev"),
                KeyBinding::new("C", "toggle_cycle"),
                KeyBinding::new("A", "audio_focus"),
                KeyBinding::new("0", "mute_all"),
                KeyBinding::new("M", "mute_all"),
            ]);
            bindings
        }
    }
}
