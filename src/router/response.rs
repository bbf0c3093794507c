//! Per-invocation response builder.

use slash_proto::{AllowedMentions, Component, Embed, File, MessageFlags, ResponseData};

/// Accumulates the outgoing message for one invocation.
///
/// Created empty by the router, mutated by the runner (and, on failure, by
/// the error responder), then consumed once to build the reply.
#[derive(Debug, Default)]
pub struct Response {
    data: ResponseData,
}

impl Response {
    /// An empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the message should be read aloud.
    pub fn tts(&mut self, tts: bool) -> &mut Self {
        self.data.tts = tts;
        self
    }

    /// Replace the message text.
    pub fn content(&mut self, content: impl Into<String>) -> &mut Self {
        self.data.content = Some(content.into());
        self
    }

    /// Replace the components.
    pub fn components(&mut self, components: Vec<Component>) -> &mut Self {
        self.data.components = components;
        self
    }

    /// Append components.
    pub fn add_components(&mut self, components: impl IntoIterator<Item = Component>) -> &mut Self {
        self.data.components.extend(components);
        self
    }

    /// Replace the embeds.
    pub fn embeds(&mut self, embeds: Vec<Embed>) -> &mut Self {
        self.data.embeds = embeds;
        self
    }

    /// Append embeds.
    pub fn add_embeds(&mut self, embeds: impl IntoIterator<Item = Embed>) -> &mut Self {
        self.data.embeds.extend(embeds);
        self
    }

    /// Restrict which mentions notify.
    pub fn allowed_mentions(&mut self, allowed: AllowedMentions) -> &mut Self {
        self.data.allowed_mentions = Some(allowed);
        self
    }

    /// Replace the attachments.
    pub fn files(&mut self, files: Vec<File>) -> &mut Self {
        self.data.files = files;
        self
    }

    /// Append attachments.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = File>) -> &mut Self {
        self.data.files.extend(files);
        self
    }

    /// Reset the flags, then set the requested ones.
    pub fn flags(&mut self, suppress_embeds: bool, ephemeral: bool) -> &mut Self {
        let mut flags = MessageFlags::empty();
        if suppress_embeds {
            flags.insert(MessageFlags::SUPPRESS_EMBEDS);
        }
        if ephemeral {
            flags.insert(MessageFlags::EPHEMERAL);
        }
        self.data.flags = flags;
        self
    }

    /// The message as built so far.
    pub fn data(&self) -> &ResponseData {
        &self.data
    }

    pub(crate) fn into_data(self) -> ResponseData {
        self.data
    }
}
