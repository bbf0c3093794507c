//! Outbound interaction responses.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::OptionValue;

/// A single auto-completion suggestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown to the user.
    pub name: String,
    /// Value filled into the option when the suggestion is picked.
    pub value: OptionValue,
}

impl Choice {
    /// Create a suggestion.
    pub fn new(name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A message component (button, select menu, ...).
///
/// Components are passed through to the platform verbatim; this crate does
/// not model their structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(pub serde_json::Value);

/// A field inside an [`Embed`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

/// Rich embedded content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    /// Title line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link attached to the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Sidebar colour as `0xRRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Fields in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// Controls which mentions in the content actually notify.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedMentions {
    /// Mention kinds parsed from content (`"users"`, `"roles"`, `"everyone"`).
    pub parse: Vec<String>,
    /// Explicitly allowed role ids.
    pub roles: Vec<String>,
    /// Explicitly allowed user ids.
    pub users: Vec<String>,
    /// Whether the author of a replied-to message is pinged.
    pub replied_user: bool,
}

/// An attachment uploaded with the response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// File name shown to users.
    pub name: String,
    /// MIME type.
    #[serde(default)]
    pub content_type: String,
    /// Raw bytes; base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T: AsRef<[u8]>, S: Serializer>(data: &T, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(data.as_ref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Message flag bitset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageFlags(u64);

impl MessageFlags {
    /// Do not render link embeds for this message.
    pub const SUPPRESS_EMBEDS: Self = Self(1 << 2);
    /// Only the invoking user can see this message.
    pub const EPHEMERAL: Self = Self(1 << 6);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set every bit of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// Kind of an [`InteractionResponse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// A message posted in reply to a command invocation.
    ChannelMessage,
    /// The suggestion list for an autocomplete event.
    AutocompleteResult,
}

/// Body of an [`InteractionResponse`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseData {
    /// Message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Read the message aloud.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,
    /// Interactive components.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// Embedded content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    /// Mention restrictions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Attachments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    /// Message flags.
    #[serde(skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
    /// Autocomplete suggestions. `Some(vec![])` means "no suggestions" and is
    /// serialized as an explicit empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
}

/// A complete response to one event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Response body.
    pub data: ResponseData,
}

impl InteractionResponse {
    /// A channel message carrying `data`.
    pub fn message(data: ResponseData) -> Self {
        Self {
            kind: ResponseKind::ChannelMessage,
            data,
        }
    }

    /// An autocomplete result carrying exactly `choices`.
    pub fn autocomplete(choices: Vec<Choice>) -> Self {
        Self {
            kind: ResponseKind::AutocompleteResult,
            data: ResponseData {
                choices: Some(choices),
                ..ResponseData::default()
            },
        }
    }
}

/// Outbound frame: a response tagged with the id of the event it answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Id of the originating [`Event`](crate::Event).
    pub id: String,
    /// The response itself.
    #[serde(flatten)]
    pub response: InteractionResponse,
}

impl Reply {
    /// Tag `response` with an event id.
    pub fn new(id: impl Into<String>, response: InteractionResponse) -> Self {
        Self {
            id: id.into(),
            response,
        }
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
