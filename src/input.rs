//! Routes key presses and control messages to layout actions.

use crate::layout::{Action, AudioSelector, parse_position};
use spectate_config::{Config, KeyBinding, LayoutFamily};
use spectate_control::{ControlCommand, ControlMessage};
use spectate_keybindings::{KeyInput, KeybindingRegistry, NamedKey};

/// What to do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub action: Option<Action>,
    /// Suppress the browser's own handling (page scroll, focus traversal)
    pub prevent_default: bool,
}

pub struct InputRouter {
    family: LayoutFamily,
    registry: KeybindingRegistry,
}

impl InputRouter {
    pub fn new(family: LayoutFamily, bindings: &[KeyBinding]) -> Self {
        let registry = KeybindingRegistry::from_config(bindings);
        for (_, action) in registry.iter() {
            if Action::from_name(action).is_none() {
                log::warn!("Keybinding action '{}' is not a known action", action);
            }
        }
        Self { family, registry }
    }

    /// Router for the configured family, user bindings merged with defaults.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.family, &config.effective_keybindings())
    }

    pub fn route_key(&self, event: &KeyInput) -> KeyOutcome {
        if event.repeat {
            return KeyOutcome::default();
        }
        let Some(name) = self.registry.lookup(event) else {
            return KeyOutcome::default();
        };
        let Some(action) = Action::from_name(name) else {
            log::debug!("Key {:?} bound to unknown action '{}'", event.key, name);
            return KeyOutcome::default();
        };
        crate::debug_trace!("INPUT", "key {:?} -> {:?}", event.key, action);

        let prevent_default = matches!(
            NamedKey::from_dom_key(&event.key),
            Some(NamedKey::Space | NamedKey::Tab)
        );
        KeyOutcome {
            action: Some(action),
            prevent_default,
        }
    }

    /// Translate a control message. Unknown commands yield `None`.
    pub fn route_control(&self, message: &ControlMessage) -> Option<Action> {
        let Some(command) = message.command() else {
            log::debug!("Ignoring control message {:?}", message.cmd);
            return None;
        };
        let action = match command {
            ControlCommand::Mode(arg) => {
                Action::SetMode(self.family.resolve_mode(arg.as_deref()))
            }
            // Anything that names no position focuses the left/first stream
            ControlCommand::Focus(arg) => {
                Action::SetFocus(arg.as_deref().and_then(parse_position).unwrap_or(0))
            }
            ControlCommand::Audio(arg) => Action::SetAudio(audio_selector(arg.as_deref())),
            ControlCommand::Swap => Action::Swap,
            ControlCommand::Next => Action::Next,
            ControlCommand::Prev => Action::Prev,
            ControlCommand::Cycle => Action::ToggleCycle,
        };
        Some(action)
    }
}

/// Any argument that names no slot mutes everything.
fn audio_selector(arg: Option<&str>) -> AudioSelector {
    match arg.map(|a| a.trim().to_ascii_lowercase()).as_deref() {
        Some("focus") => AudioSelector::Focused,
        Some(other) => parse_position(other).map_or(AudioSelector::None, AudioSelector::Stream),
        None => AudioSelector::None,
    }
}
