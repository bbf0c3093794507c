//! ECHO command.
//!
//! `echo text:<string> [ephemeral:<bool>]`
//!
//! Replies with `text`. With `ephemeral` set, only the invoker sees it.

use crate::router::{Context, Response, RunResult, Runner};

use super::required_str;

/// Handler for the `echo` command.
pub struct EchoCommand;

impl Runner for EchoCommand {
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        let text = required_str(ctx, "text")?;
        let ephemeral = ctx
            .option("ephemeral")
            .and_then(|o| o.value.as_bool())
            .unwrap_or(false);

        resp.content(text);
        if ephemeral {
            resp.flags(false, true);
        }
        Ok(())
    }
}
