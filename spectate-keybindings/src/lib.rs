//! Keybinding system for the spectate viewer.
//!
//! Maps key events from the page to action names defined in config.
//!
//! Features:
//! - Configurable key combinations (Space, Shift+Tab, Ctrl+1, etc.)
//! - Case-insensitive character keys (`S` fires for `s` and `S`)
//! - Physical key support for layout-independent bindings (`[KeyQ]`)

mod matcher;
pub mod parser;

pub use matcher::{KeyInput, KeybindingMatcher, MatchQuality};
pub use parser::{KeyCombo, Modifiers, NamedKey, ParseError, ParsedKey, parse_key_combo};

use spectate_config::KeyBinding;

/// Registry of keybindings mapping key combinations to action names.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    /// Parsed key combos and their action names, in config order
    bindings: Vec<(KeyCombo, String)>,
}

impl KeybindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped. When the same combo
    /// is bound twice, the first binding wins.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        log::info!(
            "Building keybinding registry from {} config keybindings",
            keybindings.len()
        );
        for binding in keybindings {
            match parser::parse_key_combo(&binding.key) {
                Ok(combo) => {
                    if registry.bindings.iter().any(|(existing, _)| *existing == combo) {
                        log::warn!(
                            "Keybinding '{}' already bound, ignoring action '{}'",
                            binding.key,
                            binding.action
                        );
                        continue;
                    }
                    log::debug!(
                        "Registered keybinding: {} -> {} (parsed as: {})",
                        binding.key,
                        binding.action,
                        combo
                    );
                    registry.bindings.push((combo, binding.action.clone()));
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Look up an action for a key event.
    ///
    /// An exact modifier match is preferred over a Shift-insensitive one, so
    /// `Shift+S` and `S` can be bound to different actions.
    pub fn lookup(&self, event: &KeyInput) -> Option<&str> {
        let matcher = KeybindingMatcher::from_event(event);

        self.bindings
            .iter()
            .filter_map(|(combo, action)| {
                matcher
                    .match_quality(combo)
                    .map(|quality| (quality, action.as_str()))
            })
            // max_by_key keeps the last maximum; reverse so config order wins ties
            .rev()
            .max_by_key(|(quality, _)| *quality)
            .map(|(_, action)| action)
    }

    /// Registered combos and their action names, in config order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &str)> {
        self.bindings
            .iter()
            .map(|(combo, action)| (combo, action.as_str()))
    }

    /// Check if the registry has any bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
