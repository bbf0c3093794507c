//! Newline-delimited JSON transport over any byte stream.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use slash_proto::{Event, InteractionResponse, LineCodec, Reply};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::warn;

use super::Transport;
use crate::error::TransportError;

/// One event per line in, one [`Reply`] per line out.
///
/// Lines that are not valid events are logged and skipped so a single bad
/// frame does not end the session. Framing errors (over-long lines, invalid
/// UTF-8) do end it.
pub struct FramedTransport<S> {
    framed: Framed<S, LineCodec>,
}

impl<S> FramedTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S, max_frame: usize) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec::with_max_len(max_frame)),
        }
    }
}

#[async_trait]
impl<S> Transport for FramedTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Option<Event>, TransportError> {
        loop {
            let Some(line) = self.framed.next().await.transpose()? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }

            match Event::parse(&line) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => warn!(error = %e, "Discarding malformed event frame"),
            }
        }
    }

    async fn respond(
        &mut self,
        event: &Event,
        response: InteractionResponse,
    ) -> Result<(), TransportError> {
        let line = Reply::new(event.id.clone(), response).to_line()?;
        self.framed.send(line).await?;
        Ok(())
    }
}
