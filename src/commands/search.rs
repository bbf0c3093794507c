//! SEARCH command.
//!
//! `search query:<string>`
//!
//! Completes the focused option against a fixed entry list and, when run,
//! confirms the query names one of the entries. Failures are rendered by the
//! command itself rather than the router default.

use std::sync::Arc;

use slash_proto::{Choice, CommandOption};

use crate::error::CommandError;
use crate::router::{AutoCompleter, Context, ErrorResponder, Response, RunResult, Runner};

use super::required_str;

/// Most suggestions a single autocomplete reply carries.
pub const MAX_CHOICES: usize = 25;

/// Handler for the `search` command.
pub struct SearchCommand {
    entries: Vec<String>,
}

impl SearchCommand {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    fn find(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.to_lowercase() == query)
            .map(String::as_str)
    }
}

impl Runner for SearchCommand {
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        let query = required_str(ctx, "query")?;
        let entry = self
            .find(query)
            .ok_or_else(|| CommandError::NoMatch(query.to_string()))?;

        resp.content(format!("found: {entry}"));
        Ok(())
    }

    fn auto_completer(self: Arc<Self>) -> Option<Arc<dyn AutoCompleter>> {
        Some(self)
    }

    fn error_responder(self: Arc<Self>) -> Option<Arc<dyn ErrorResponder>> {
        Some(self)
    }
}

impl AutoCompleter for SearchCommand {
    fn auto_complete(&self, _ctx: &Context<'_>, focused: Option<&CommandOption>) -> Vec<Choice> {
        let prefix = focused
            .and_then(|o| o.value.as_str())
            .unwrap_or_default()
            .to_lowercase();

        self.entries
            .iter()
            .filter(|e| e.to_lowercase().starts_with(&prefix))
            .take(MAX_CHOICES)
            .map(|e| Choice::new(e.as_str(), e.as_str()))
            .collect()
    }
}

impl ErrorResponder for SearchCommand {
    fn respond_error(&self, _ctx: &Context<'_>, resp: &mut Response, err: &anyhow::Error) {
        resp.content(format!("custom: {err}")).flags(false, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Router;
    use slash_proto::{Event, MessageFlags, OptionValue, ResponseKind};

    fn router(entries: &[&str]) -> Router {
        let router = Router::default();
        let command = SearchCommand::new(entries.iter().map(|s| s.to_string()).collect());
        router.auto_bind("search", Arc::new(command)).unwrap();
        router
    }

    #[test]
    fn test_completes_by_prefix_ignoring_case() {
        let router = router(&["Apple", "apricot", "banana"]);
        let event = Event::autocomplete("1", "search").with_focused("query", "AP");
        let resp = router.dispatch(&event).unwrap();

        assert_eq!(resp.kind, ResponseKind::AutocompleteResult);
        let names: Vec<_> = resp
            .data
            .choices
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Apple", "apricot"]);
    }

    #[test]
    fn test_completion_is_capped() {
        let entries: Vec<String> = (0..40).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
        let router = router(&refs);
        let event = Event::autocomplete("1", "search").with_focused("query", "item");

        let choices = router.dispatch(&event).unwrap().data.choices.unwrap();
        assert_eq!(choices.len(), MAX_CHOICES);
        assert_eq!(choices[0].value, OptionValue::from("item0"));
    }

    #[test]
    fn test_no_focused_option_lists_everything() {
        let router = router(&["alpha", "beta"]);
        let event = Event::autocomplete("1", "search");

        let choices = router.dispatch(&event).unwrap().data.choices.unwrap();
        assert_eq!(choices.len(), 2);
    }

    #[test]
    fn test_run_found() {
        let router = router(&["alpha"]);
        let event = Event::command("1", "search").with_option("query", "ALPHA");
        let resp = router.dispatch(&event).unwrap();

        assert_eq!(resp.data.content.as_deref(), Some("found: alpha"));
    }

    #[test]
    fn test_miss_uses_own_responder() {
        let router = router(&["alpha"]);
        let event = Event::command("1", "search").with_option("query", "zeta");
        let resp = router.dispatch(&event).unwrap();

        assert_eq!(resp.data.content.as_deref(), Some("custom: no entry matches 'zeta'"));
        assert!(resp.data.flags.contains(MessageFlags::EPHEMERAL));
    }
}
