//! Dispatch timing and span helpers.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tracing::{Span, info_span};

/// Times one runner invocation.
///
/// Latency lands in `slash_command_duration_seconds` when the guard drops,
/// so early returns and failures are measured too.
pub struct CommandTimer<'a> {
    command: &'a str,
    start: Instant,
}

impl<'a> CommandTimer<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }

    /// Time spent so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for CommandTimer<'_> {
    fn drop(&mut self) {
        crate::metrics::record_command(self.command, self.elapsed().as_secs_f64());
    }
}

/// Span wrapping every event read from one gateway connection.
pub fn session_span(peer: SocketAddr) -> Span {
    info_span!("session", peer = %peer)
}
