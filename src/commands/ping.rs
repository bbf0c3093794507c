//! PING command.
//!
//! Liveness check: always replies `pong`.

use crate::router::{Context, Response, RunResult, Runner};

/// Handler for the `ping` command.
pub struct PingCommand;

impl Runner for PingCommand {
    fn run(&self, _ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        resp.content("pong");
        Ok(())
    }
}
