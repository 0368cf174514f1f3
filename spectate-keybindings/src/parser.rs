//! Key combination parser.
//!
//! Parses human-readable key strings like "Shift+Tab" or "Ctrl+1" into
//! KeyCombo structs. Also supports physical key codes for layout-independent
//! bindings (e.g., "[KeyS]", "[Digit1]"), matched against the DOM `code` field.

use std::fmt;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Set of active modifiers for a key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
    /// Either Ctrl or Meta/Cmd, whichever the viewer's platform uses
    pub cmd_or_ctrl: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.super_key || self.cmd_or_ctrl)
    }
}

/// Named (non-character) keys, by their DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl NamedKey {
    /// Map a DOM `KeyboardEvent.key` value to a named key.
    ///
    /// The space bar reports `" "` as its key, not `"Space"`.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let named = match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "F1" => Self::F1,
            "F2" => Self::F2,
            "F3" => Self::F3,
            "F4" => Self::F4,
            "F5" => Self::F5,
            "F6" => Self::F6,
            "F7" => Self::F7,
            "F8" => Self::F8,
            "F9" => Self::F9,
            "F10" => Self::F10,
            "F11" => Self::F11,
            "F12" => Self::F12,
            _ => return None,
        };
        Some(named)
    }
}

impl NamedKey {
    /// The DOM `KeyboardEvent.key` value this key reports.
    pub fn dom_key(self) -> String {
        match self {
            Self::Space => " ".to_string(),
            // Variant names are the DOM names
            other => format!("{:?}", other),
        }
    }
}

/// A parsed key combination (modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.cmd_or_ctrl {
            parts.push("CmdOrCtrl".to_string());
        }
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.super_key {
            parts.push("Super".to_string());
        }

        match &self.key {
            ParsedKey::Character(c) => parts.push(c.to_string()),
            ParsedKey::Named(n) => parts.push(format!("{:?}", n)),
            ParsedKey::Physical(code) => parts.push(format!("[{}]", code)),
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// The actual key (either a character, a named key or a physical position).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key (e.g., 'A', '1'), stored uppercased
    Character(char),
    /// A named key (e.g., Tab, Space, ArrowLeft)
    Named(NamedKey),
    /// A DOM `code` value (e.g., "KeyS", "Digit1") matched by key position
    Physical(String),
}

/// Parse a key combination string into a KeyCombo.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Super`, `Cmd`, `Command`, `Meta`, `Win` - Meta key
/// - `CmdOrCtrl` - either Meta or Control
///
/// Keys:
/// - Single characters: `A`, `S`, `1`, etc.
/// - Named keys: `Space`, `Tab`, `Enter`, `Escape`, `Left`, `F1`-`F12`, etc.
/// - Physical keys: `[KeyS]`, `[Digit1]`
///
/// A literal `+` key is written as the last part after a trailing `+`, e.g. `"Shift++"`.
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError("Empty key combination".to_string()));
    }

    let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
    // "Shift++" splits into ["Shift", "", ""]: the key is a literal '+'
    if s.ends_with("++") || s == "+" {
        parts.retain(|p| !p.is_empty());
        parts.push("+");
    }

    let mut modifiers = Modifiers::default();
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let part_lower = part.to_lowercase();

        // Check if this is a modifier
        let is_modifier = match part_lower.as_str() {
            "ctrl" | "control" => {
                modifiers.ctrl = true;
                true
            }
            "alt" | "option" => {
                modifiers.alt = true;
                true
            }
            "shift" => {
                modifiers.shift = true;
                true
            }
            "super" | "cmd" | "command" | "meta" | "win" => {
                modifiers.super_key = true;
                true
            }
            "cmdorctrl" => {
                modifiers.cmd_or_ctrl = true;
                true
            }
            _ => false,
        };

        if !is_modifier {
            if key_part.is_some() {
                return Err(ParseError(format!(
                    "Multiple keys specified: already have key, found '{}'",
                    part
                )));
            }
            key_part = Some(*part);
        } else if is_last {
            // Last part is a modifier with no key - invalid
            return Err(ParseError(
                "Key combination ends with modifier, no key specified".to_string(),
            ));
        }
    }

    let key_str = key_part.ok_or_else(|| ParseError("No key specified".to_string()))?;
    let key = parse_key(key_str)?;

    Ok(KeyCombo { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if s.is_empty() {
        return Err(ParseError("No key specified".to_string()));
    }

    // Check for physical key syntax: [KeyCode] (e.g., [KeyS], [Digit1])
    if s.starts_with('[') && s.ends_with(']') && s.len() > 2 {
        let code_str = &s[1..s.len() - 1];
        if let Some(code) = parse_physical_key_code(code_str) {
            return Ok(ParsedKey::Physical(code));
        }
        return Err(ParseError(format!(
            "Unknown physical key code: '{}'",
            code_str
        )));
    }

    // Try named keys first (case-insensitive)
    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    // Single character
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(ParsedKey::Character(c.to_ascii_uppercase()));
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Parse a physical key code into its canonical DOM `code` spelling.
/// Supports "KeyA".."KeyZ", "Digit0".."Digit9", "Numpad0".."Numpad9",
/// arrows, and the common editing/whitespace keys.
fn parse_physical_key_code(s: &str) -> Option<String> {
    let lower = s.to_ascii_lowercase();

    let single_suffix = |prefix: &str, pred: fn(&char) -> bool| -> Option<char> {
        let rest = lower.strip_prefix(prefix)?;
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if pred(&c) => Some(c),
            _ => None,
        }
    };

    if let Some(c) = single_suffix("key", char::is_ascii_lowercase) {
        return Some(format!("Key{}", c.to_ascii_uppercase()));
    }
    if let Some(d) = single_suffix("digit", char::is_ascii_digit) {
        return Some(format!("Digit{}", d));
    }
    if let Some(d) = single_suffix("numpad", char::is_ascii_digit) {
        return Some(format!("Numpad{}", d));
    }

    let canonical = match lower.as_str() {
        "space" => "Space",
        "tab" => "Tab",
        "enter" => "Enter",
        "escape" => "Escape",
        "backspace" => "Backspace",
        "arrowup" => "ArrowUp",
        "arrowdown" => "ArrowDown",
        "arrowleft" => "ArrowLeft",
        "arrowright" => "ArrowRight",
        "minus" => "Minus",
        "equal" => "Equal",
        "comma" => "Comma",
        "period" => "Period",
        "slash" => "Slash",
        _ => return None,
    };
    Some(canonical.to_string())
}

/// Parse a named key string into a NamedKey.
fn parse_named_key(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        // Function keys
        "f1" => Some(NamedKey::F1),
        "f2" => Some(NamedKey::F2),
        "f3" => Some(NamedKey::F3),
        "f4" => Some(NamedKey::F4),
        "f5" => Some(NamedKey::F5),
        "f6" => Some(NamedKey::F6),
        "f7" => Some(NamedKey::F7),
        "f8" => Some(NamedKey::F8),
        "f9" => Some(NamedKey::F9),
        "f10" => Some(NamedKey::F10),
        "f11" => Some(NamedKey::F11),
        "f12" => Some(NamedKey::F12),

        // Common named keys
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" | "spacebar" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        // Arrow keys
        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),

        _ => None,
    }
}
