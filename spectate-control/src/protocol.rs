//! JSON protocol types for control messages.

use crate::ControlError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw control message as published on the channel.
///
/// Both fields are optional on the wire: a message without `cmd` is ignored,
/// and `arg` may be a string or a number (`{"cmd":"focus","arg":2}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Value>,
}

impl ControlMessage {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: Some(cmd.into()),
            arg: None,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(Value::String(arg.into()));
        self
    }

    /// Decode a message from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ControlError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The argument as text. Numbers and booleans are rendered, null and
    /// structured values are treated as absent.
    pub fn arg_text(&self) -> Option<String> {
        match self.arg.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Interpret the message. Unknown or missing commands yield `None`.
    pub fn command(&self) -> Option<ControlCommand> {
        let cmd = self.cmd.as_deref()?.trim();
        let arg = self.arg_text();
        let command = match cmd.to_ascii_lowercase().as_str() {
            "mode" => ControlCommand::Mode(arg),
            "focus" => ControlCommand::Focus(arg),
            "swap" => ControlCommand::Swap,
            "audio" => ControlCommand::Audio(arg),
            "next" => ControlCommand::Next,
            "prev" | "previous" => ControlCommand::Prev,
            "cycle" => ControlCommand::Cycle,
            _ => return None,
        };
        Some(command)
    }
}

/// A recognised control command with its raw argument.
///
/// Arguments stay as text here; what `"right"` or `"3"` means depends on the
/// viewer's layout family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Mode(Option<String>),
    Focus(Option<String>),
    Swap,
    Audio(Option<String>),
    Next,
    Prev,
    Cycle,
}

impl ControlCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode(_) => "mode",
            Self::Focus(_) => "focus",
            Self::Swap => "swap",
            Self::Audio(_) => "audio",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Cycle => "cycle",
        }
    }
}
