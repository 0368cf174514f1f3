//! Key event matching.
//!
//! Matches DOM-style key events against parsed KeyCombos. Supports both
//! logical key matching (the `key` field) and physical key matching (the
//! `code` field) for layout-independent bindings.

use super::parser::{KeyCombo, Modifiers, NamedKey, ParsedKey};

/// A key-down event as delivered by the page.
///
/// Mirrors the fields of a DOM `KeyboardEvent` the viewer cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Logical key value (`"s"`, `"S"`, `" "`, `"Tab"`, `"ArrowLeft"`)
    pub key: String,
    /// Physical key position (`"KeyS"`, `"Digit1"`), when known
    pub code: Option<String>,
    pub modifiers: Modifiers,
    /// Set by the platform for auto-repeated key-down events
    pub repeat: bool,
}

impl KeyInput {
    /// A plain, non-repeated key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: None,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// The key press that a combo describes, as the page would report it.
    ///
    /// `CmdOrCtrl` is pressed as Ctrl. Physical combos report the code with
    /// an empty logical key.
    pub fn from_combo(combo: &KeyCombo) -> Self {
        let mut modifiers = combo.modifiers;
        if modifiers.cmd_or_ctrl {
            modifiers.cmd_or_ctrl = false;
            modifiers.ctrl = true;
        }
        let (key, code) = match &combo.key {
            ParsedKey::Character(c) if modifiers.shift => (c.to_string(), None),
            ParsedKey::Character(c) => (c.to_lowercase().to_string(), None),
            ParsedKey::Named(named) => (named.dom_key(), None),
            ParsedKey::Physical(code) => (String::new(), Some(code.clone())),
        };
        Self {
            key,
            code,
            modifiers,
            repeat: false,
        }
    }
}

/// Matcher for comparing key events against keybindings.
#[derive(Debug)]
pub struct KeybindingMatcher {
    /// Active modifiers from the event
    modifiers: Modifiers,
    /// The logical key from the event
    key: Option<MatchKey>,
    /// The physical key code from the event
    physical_key: Option<String>,
}

/// Normalized key for matching purposes.
#[derive(Debug, PartialEq)]
enum MatchKey {
    Character(char),
    Named(NamedKey),
}

/// How closely an event matched a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    /// Key matched with Shift held although the combo does not name it
    ShiftInsensitive,
    /// Key and every modifier matched
    Exact,
}

impl KeybindingMatcher {
    /// Create a matcher from a key event.
    pub fn from_event(event: &KeyInput) -> Self {
        let key = match NamedKey::from_dom_key(&event.key) {
            Some(named) => Some(MatchKey::Named(named)),
            None => {
                let mut chars = event.key.chars();
                match (chars.next(), chars.next()) {
                    // Uppercased for case-insensitive matching
                    (Some(c), None) => Some(MatchKey::Character(c.to_ascii_uppercase())),
                    _ => None,
                }
            }
        };

        Self {
            modifiers: event.modifiers,
            key,
            physical_key: event.code.clone(),
        }
    }

    /// Check if this event matches the given key combo.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.match_quality(combo).is_some()
    }

    /// Match the combo and report how well it matched.
    ///
    /// A binding without `Shift` also accepts the shifted press of the same
    /// key, so `S` fires for both `s` and `S` and `Tab` for `Shift+Tab`.
    /// Other modifiers must match exactly.
    pub fn match_quality(&self, combo: &KeyCombo) -> Option<MatchQuality> {
        // Check key first (quick rejection)
        let key_matches = match &combo.key {
            ParsedKey::Physical(code) => self.physical_key.as_deref() == Some(code.as_str()),
            ParsedKey::Character(combo_char) => matches!(
                &self.key,
                Some(MatchKey::Character(c)) if c.eq_ignore_ascii_case(combo_char)
            ),
            ParsedKey::Named(combo_named) => self.key == Some(MatchKey::Named(*combo_named)),
        };

        if !key_matches {
            return None;
        }

        if self.modifiers_match(&combo.modifiers, self.modifiers.shift) {
            return Some(MatchQuality::Exact);
        }

        if !combo.modifiers.shift && self.modifiers_match(&combo.modifiers, false) {
            return Some(MatchQuality::ShiftInsensitive);
        }

        None
    }

    /// Check if modifiers match, handling CmdOrCtrl specially.
    ///
    /// `event_shift` is passed separately so the Shift-insensitive pass can
    /// pretend Shift was not held.
    fn modifiers_match(&self, combo_mods: &Modifiers, event_shift: bool) -> bool {
        let ctrl_or_super_ok = if combo_mods.cmd_or_ctrl {
            // The page cannot tell which platform convention the viewer uses
            self.modifiers.ctrl || self.modifiers.super_key
        } else {
            self.modifiers.ctrl == combo_mods.ctrl
                && self.modifiers.super_key == combo_mods.super_key
        };

        ctrl_or_super_ok && self.modifiers.alt == combo_mods.alt && event_shift == combo_mods.shift
    }
}
