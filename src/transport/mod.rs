//! Event transports.
//!
//! A transport is the session that delivers platform events and carries
//! responses back. The router only needs [`Transport::receive`] and
//! [`Transport::respond`]; serialization stays on the transport side.

mod framed;

pub use framed::FramedTransport;

use async_trait::async_trait;
use slash_proto::{Event, InteractionResponse};

use crate::error::TransportError;

/// A bidirectional event session.
#[async_trait]
pub trait Transport: Send {
    /// Next inbound event. `Ok(None)` means the peer closed the session.
    async fn receive(&mut self) -> Result<Option<Event>, TransportError>;

    /// Send `response` as the answer to `event`.
    async fn respond(
        &mut self,
        event: &Event,
        response: InteractionResponse,
    ) -> Result<(), TransportError>;
}
