//! Bound units: a runner plus its optional capabilities.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::traits::{AutoCompleter, ErrorResponder, Runner};
use crate::error::BindError;

/// Caller-facing route description, validated by `Router::bind`.
///
/// Absent optional capabilities defer to the router's defaults.
#[derive(Clone, Default)]
pub struct CommandRoute {
    /// Required; binding fails without it.
    pub runner: Option<Arc<dyn Runner>>,
    pub auto_completer: Option<Arc<dyn AutoCompleter>>,
    pub error_responder: Option<Arc<dyn ErrorResponder>>,
}

impl CommandRoute {
    /// A route with only a runner.
    pub fn new(runner: Arc<dyn Runner>) -> Self {
        Self {
            runner: Some(runner),
            ..Self::default()
        }
    }

    /// A route built from a bare runner, attaching whichever optional
    /// capabilities the runner advertises.
    ///
    /// This is the only place capabilities are probed.
    pub fn detect(runner: Arc<dyn Runner>) -> Self {
        Self {
            auto_completer: Arc::clone(&runner).auto_completer(),
            error_responder: Arc::clone(&runner).error_responder(),
            runner: Some(runner),
        }
    }

    pub fn with_auto_completer(mut self, completer: Arc<dyn AutoCompleter>) -> Self {
        self.auto_completer = Some(completer);
        self
    }

    pub fn with_error_responder(mut self, responder: Arc<dyn ErrorResponder>) -> Self {
        self.error_responder = Some(responder);
        self
    }
}

impl fmt::Debug for CommandRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRoute")
            .field("runner", &self.runner.is_some())
            .field("auto_completer", &self.auto_completer.is_some())
            .field("error_responder", &self.error_responder.is_some())
            .finish()
    }
}

/// A validated route as stored in the registry.
pub struct Route {
    runner: Arc<dyn Runner>,
    auto_completer: Option<Arc<dyn AutoCompleter>>,
    error_responder: Option<Arc<dyn ErrorResponder>>,
    /// Command invocations since this route was bound.
    invocations: AtomicU64,
}

impl Route {
    /// Validate `cmd` for binding under `name`.
    pub(crate) fn validate(name: &str, cmd: CommandRoute) -> Result<Self, BindError> {
        if name.is_empty() {
            return Err(BindError::EmptyName);
        }
        let Some(runner) = cmd.runner else {
            return Err(BindError::MissingRunner {
                name: name.to_string(),
            });
        };

        Ok(Self {
            runner,
            auto_completer: cmd.auto_completer,
            error_responder: cmd.error_responder,
            invocations: AtomicU64::new(0),
        })
    }

    #[inline]
    pub fn runner(&self) -> &Arc<dyn Runner> {
        &self.runner
    }

    #[inline]
    pub fn auto_completer(&self) -> Option<&Arc<dyn AutoCompleter>> {
        self.auto_completer.as_ref()
    }

    #[inline]
    pub fn error_responder(&self) -> Option<&Arc<dyn ErrorResponder>> {
        self.error_responder.as_ref()
    }

    /// Command invocations since this route was bound.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    pub(crate) fn record_invocation(&self) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("auto_completer", &self.auto_completer.is_some())
            .field("error_responder", &self.error_responder.is_some())
            .field("invocations", &self.invocations())
            .finish_non_exhaustive()
    }
}
