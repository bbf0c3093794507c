//! Builtin commands served by the daemon.
//!
//! Each command is a [`Runner`]; the ones that also complete options or
//! render their own failures advertise it through the capability methods, so
//! [`register_builtin`] can bind everything with `auto_bind`.

mod echo;
mod info;
mod ping;
mod search;

pub use echo::EchoCommand;
pub use info::{CommandsCommand, StatsCommand};
pub use ping::PingCommand;
pub use search::{MAX_CHOICES, SearchCommand};

use std::sync::Arc;

use tracing::info;

use crate::config::SearchConfig;
use crate::error::{BindError, CommandError};
use crate::router::{Context, Router, Runner};

/// Bind every builtin command on `router`.
pub fn register_builtin(router: &Router, search: &SearchConfig) -> Result<(), BindError> {
    let runners: Vec<(&str, Arc<dyn Runner>)> = vec![
        ("ping", Arc::new(PingCommand) as Arc<dyn Runner>),
        ("echo", Arc::new(EchoCommand) as Arc<dyn Runner>),
        ("search", Arc::new(SearchCommand::new(search.entries.clone())) as Arc<dyn Runner>),
        ("commands", Arc::new(CommandsCommand) as Arc<dyn Runner>),
        ("stats", Arc::new(StatsCommand) as Arc<dyn Runner>),
    ];
    router.auto_bind_all(runners)?;

    info!(count = router.registry().len(), "Builtin commands registered");
    Ok(())
}

/// Fetch a string option or fail with the shared wording.
pub(crate) fn required_str<'a>(ctx: &Context<'a>, name: &str) -> Result<&'a str, CommandError> {
    let option = ctx
        .option(name)
        .ok_or_else(|| CommandError::MissingOption(name.to_string()))?;
    option.value.as_str().ok_or_else(|| CommandError::InvalidOption {
        name: name.to_string(),
        expected: "a string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slash_proto::Event;

    #[test]
    fn test_register_builtin_binds_all() {
        let router = Router::default();
        register_builtin(&router, &SearchConfig::default()).unwrap();

        assert_eq!(
            router.registry().names(),
            vec!["commands", "echo", "ping", "search", "stats"]
        );
        assert!(router.lookup("SEARCH").unwrap().auto_completer().is_some());
        assert!(router.lookup("search").unwrap().error_responder().is_some());
        assert!(router.lookup("ping").unwrap().auto_completer().is_none());
    }

    #[test]
    fn test_required_str() {
        let registry = crate::router::Registry::new();
        let event = Event::command("1", "echo")
            .with_option("Text", "hi")
            .with_option("count", 3i64);
        let ctx = Context::new(&event, &registry);

        assert_eq!(required_str(&ctx, "text").unwrap(), "hi");
        assert_eq!(
            required_str(&ctx, "missing").unwrap_err(),
            CommandError::MissingOption("missing".to_string())
        );
        assert!(matches!(
            required_str(&ctx, "count").unwrap_err(),
            CommandError::InvalidOption { .. }
        ));
    }
}
