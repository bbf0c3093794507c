//! Inbound interaction events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// The kind of interaction an [`Event`] carries.
///
/// Kinds this crate does not know decode as [`EventKind::Other`] rather than
/// failing, so newer platform event types pass through the router untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EventKind {
    /// A user invoked a command.
    Command,
    /// A user is typing into a command option and wants suggestions.
    Autocomplete,
    /// Anything else.
    Other,
}

impl From<String> for EventKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "command" => Self::Command,
            "autocomplete" => Self::Autocomplete,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Command => "command",
            Self::Autocomplete => "autocomplete",
            Self::Other => "other",
        })
    }
}

/// The value of a single command option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` / `false`.
    Boolean(bool),
    /// Integral number.
    Integer(i64),
    /// Any other number.
    Number(f64),
    /// Text, including user, channel and role ids.
    String(String),
}

impl OptionValue {
    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// An argument supplied with an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name as declared by the command.
    pub name: String,
    /// Current value. For autocomplete events this is the partial input.
    pub value: OptionValue,
    /// Whether the user is currently typing into this option.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub focused: bool,
}

/// One inbound interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Correlation token; echoed back in the [`Reply`](crate::Reply).
    pub id: String,
    /// What kind of interaction this is.
    pub kind: EventKind,
    /// Name of the invoked command, exactly as the platform sent it.
    pub command: String,
    /// Options in the order the platform sent them.
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl Event {
    /// Create an event with no options.
    pub fn new(id: impl Into<String>, kind: EventKind, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            command: command.into(),
            options: Vec::new(),
        }
    }

    /// Create a command-invocation event.
    pub fn command(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self::new(id, EventKind::Command, command)
    }

    /// Create an autocomplete event.
    pub fn autocomplete(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self::new(id, EventKind::Autocomplete, command)
    }

    /// Append an unfocused option.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.push(CommandOption {
            name: name.into(),
            value: value.into(),
            focused: false,
        });
        self
    }

    /// Append a focused option.
    pub fn with_focused(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.push(CommandOption {
            name: name.into(),
            value: value.into(),
            focused: true,
        });
        self
    }

    /// Parse a single JSON frame. Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }

    /// Serialize to a single JSON frame, without the trailing newline.
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromStr for Event {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
