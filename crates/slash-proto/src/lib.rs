//! # slash-proto
//!
//! Wire types for slash-command interaction events and the responses sent
//! back for them.
//!
//! An [`Event`] arrives as a single JSON object on its own line. The reply is
//! a [`Reply`]: the originating event id with an [`InteractionResponse`]
//! flattened beside it.
//!
//! ```rust
//! use slash_proto::{Event, EventKind};
//!
//! let event = Event::parse(r#"{"id":"7","kind":"command","command":"ping"}"#).unwrap();
//! assert_eq!(event.kind, EventKind::Command);
//! assert!(event.options.is_empty());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
#[cfg(feature = "tokio")]
pub mod line;
pub mod response;

pub use self::error::ProtocolError;
pub use self::event::{CommandOption, Event, EventKind, OptionValue};
#[cfg(feature = "tokio")]
pub use self::line::{DEFAULT_MAX_LEN, LineCodec};
pub use self::response::{
    AllowedMentions, Choice, Component, Embed, EmbedField, File, InteractionResponse,
    MessageFlags, Reply, ResponseData, ResponseKind,
};
