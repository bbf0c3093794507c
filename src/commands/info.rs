//! Introspection commands: `commands` and `stats`.
//!
//! Both read the router's registry through the context.

use crate::router::{Context, Response, RunResult, Runner};

/// Handler for the `commands` command. Lists bound command names.
pub struct CommandsCommand;

impl Runner for CommandsCommand {
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        let names = ctx.registry().names();
        resp.content(format!("commands: {}", names.join(", ")));
        Ok(())
    }
}

/// Handler for the `stats` command. Lists invocation counts, busiest first.
pub struct StatsCommand;

impl Runner for StatsCommand {
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        let stats = ctx.registry().command_stats();
        if stats.is_empty() {
            resp.content("no commands invoked yet");
            return Ok(());
        }

        let lines: Vec<String> = stats
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect();
        resp.content(lines.join("\n"));
        Ok(())
    }
}
