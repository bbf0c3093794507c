//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds a socket and spawns one session task per accepted
//! connection. Each session serves the shared router over a
//! [`FramedTransport`], so events on one connection are handled in order.

use crate::router::Router;
use crate::telemetry::session_span;
use crate::transport::FramedTransport;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns sessions.
pub struct Gateway {
    listener: TcpListener,
    max_frame: usize,
    router: Arc<Router>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        max_frame: usize,
        router: Arc<Router>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            max_frame,
            router,
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Connection accepted");

                    if let Err(e) = stream.set_nodelay(true) {
                        error!(%addr, error = %e, "Failed to set TCP_NODELAY");
                    }

                    let router = Arc::clone(&self.router);
                    let max_frame = self.max_frame;

                    tokio::spawn(
                        async move {
                            crate::metrics::session_opened();
                            let mut transport = FramedTransport::new(stream, max_frame);
                            if let Err(e) = router.serve(&mut transport).await {
                                error!(error = %e, "Session error");
                            }
                            crate::metrics::session_closed();
                            info!("Connection closed");
                        }
                        .instrument(session_span(addr)),
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{CommandRoute, RunnerFn};
    use slash_proto::{Event, Reply};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_connections_share_router() {
        let router = Arc::new(Router::default());
        router
            .bind(
                "ping",
                CommandRoute::new(Arc::new(RunnerFn::new(|_ctx, resp| {
                    resp.content("pong");
                    Ok(())
                }))),
            )
            .unwrap();

        let gateway = Gateway::bind("127.0.0.1:0".parse().unwrap(), 4096, Arc::clone(&router))
            .await
            .unwrap();
        let addr = gateway.local_addr().unwrap();
        tokio::spawn(gateway.run());

        for id in ["a", "b"] {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();

            let mut line = Event::command(id, "PING").to_line().unwrap();
            line.push('\n');
            write.write_all(line.as_bytes()).await.unwrap();

            let reply = Reply::parse(&lines.next_line().await.unwrap().unwrap()).unwrap();
            assert_eq!(reply.id, id);
            assert_eq!(reply.response.data.content.as_deref(), Some("pong"));
        }

        assert_eq!(router.registry().command_stats(), vec![("ping".to_string(), 2)]);
    }
}
