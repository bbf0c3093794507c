//! Test client.
//!
//! Sends events as JSON lines and parses the replies.

use slash_proto::{Event, Reply};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        // Split stream for reading and writing
        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);
        let writer = BufWriter::new(write_half);

        Ok(Self { reader, writer })
    }

    /// Send a raw line.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send an event.
    pub async fn send(&mut self, event: &Event) -> anyhow::Result<()> {
        let line = event.to_line()?;
        self.send_raw(&line).await
    }

    /// Receive a single reply from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Reply> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a reply with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Reply> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("Connection closed");
        }

        Reply::parse(line.trim_end()).map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Send an event and wait for its reply.
    pub async fn request(&mut self, event: &Event) -> anyhow::Result<Reply> {
        self.send(event).await?;
        let reply = self.recv().await?;
        anyhow::ensure!(
            reply.id == event.id,
            "reply id {} does not match event id {}",
            reply.id,
            event.id
        );
        Ok(reply)
    }
}
