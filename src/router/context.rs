//! Read-only view over one inbound event.

use slash_proto::{CommandOption, Event, EventKind};

use super::registry::Registry;

/// Invocation context handed to runners, auto-completers and error responders.
///
/// Lives only for the handling of a single event.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    event: &'a Event,
    registry: &'a Registry,
}

impl<'a> Context<'a> {
    /// Create a context for `event` against `registry`.
    pub fn new(event: &'a Event, registry: &'a Registry) -> Self {
        Self { event, registry }
    }

    /// The invoked command name, exactly as sent.
    #[inline]
    pub fn command(&self) -> &'a str {
        &self.event.command
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.event.kind
    }

    /// The raw event.
    #[inline]
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// All options in the order they were sent.
    #[inline]
    pub fn options(&self) -> &'a [CommandOption] {
        &self.event.options
    }

    /// First option whose name matches `name`, ignoring case.
    pub fn option(&self, name: &str) -> Option<&'a CommandOption> {
        self.options().iter().find(|opt| eq_fold(&opt.name, name))
    }

    /// First option marked as focused.
    pub fn focused_option(&self) -> Option<&'a CommandOption> {
        self.options().iter().find(|opt| opt.focused)
    }

    /// The registry this event is being dispatched against.
    ///
    /// Read access only; runners can list commands or read usage statistics.
    #[inline]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }
}

/// Case-insensitive comparison without allocating.
fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_lookup_ignores_case() {
        let registry = Registry::new();
        let event = Event::command("1", "Echo")
            .with_option("Text", "hello")
            .with_option("text", "shadowed");
        let ctx = Context::new(&event, &registry);

        assert_eq!(ctx.command(), "Echo");
        assert_eq!(ctx.kind(), EventKind::Command);
        let opt = ctx.option("TEXT").expect("option present");
        assert_eq!(opt.value.as_str(), Some("hello"));
        assert!(ctx.option("missing").is_none());
    }

    #[test]
    fn focused_option_returns_first_focused() {
        let registry = Registry::new();
        let event = Event::autocomplete("1", "search")
            .with_option("scope", "all")
            .with_focused("query", "ru")
            .with_focused("other", "x");
        let ctx = Context::new(&event, &registry);

        assert_eq!(ctx.focused_option().map(|o| o.name.as_str()), Some("query"));
    }

    #[test]
    fn no_focused_option() {
        let registry = Registry::new();
        let event = Event::autocomplete("1", "search").with_option("query", "ru");
        let ctx = Context::new(&event, &registry);

        assert!(ctx.focused_option().is_none());
    }

    #[test]
    fn eq_fold_handles_unicode() {
        assert!(eq_fold("STRASSE", "strasse"));
        assert!(eq_fold("ÄRGER", "ärger"));
        assert!(!eq_fold("abc", "abcd"));
    }
}
