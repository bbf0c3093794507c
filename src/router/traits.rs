//! Capability traits implemented by command handlers.
//!
//! ## Capabilities
//!
//! - [`Runner`]: required. Executes the command and may fail.
//! - [`AutoCompleter`]: optional. Supplies suggestions for the focused option.
//! - [`ErrorResponder`]: optional. Turns a runner failure into response content.
//!
//! A runner advertises the optional capabilities it also implements by
//! overriding [`Runner::auto_completer`] / [`Runner::error_responder`] to
//! return itself. `Router::auto_bind` asks exactly once, at bind time, and
//! stores the answers on the route.
//!
//! ```ignore
//! struct Search;
//!
//! impl Runner for Search {
//!     fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult { /* ... */ }
//!
//!     fn auto_completer(self: Arc<Self>) -> Option<Arc<dyn AutoCompleter>> {
//!         Some(self)
//!     }
//! }
//!
//! impl AutoCompleter for Search { /* ... */ }
//! ```

use std::sync::Arc;

use slash_proto::{Choice, CommandOption};

use super::context::Context;
use super::response::Response;

/// Result type for runners. Any error converts into a failure with `?`.
pub type RunResult = anyhow::Result<()>;

/// Prefix of the built-in error message.
pub const DEFAULT_ERROR_PREFIX: &str = "An error occurred: ";

/// Executes a command.
pub trait Runner: Send + Sync {
    /// Run the command. Mutate `resp` to build the reply; return `Err` to
    /// hand the reply over to the error responder chain.
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult;

    /// This runner viewed as an [`AutoCompleter`], if it is one.
    fn auto_completer(self: Arc<Self>) -> Option<Arc<dyn AutoCompleter>> {
        None
    }

    /// This runner viewed as an [`ErrorResponder`], if it is one.
    fn error_responder(self: Arc<Self>) -> Option<Arc<dyn ErrorResponder>> {
        None
    }
}

/// Supplies suggestions while a user types into an option.
pub trait AutoCompleter: Send + Sync {
    /// Return the suggestions for `focused` (the option being typed into, if
    /// the platform marked one). The list is sent back verbatim.
    fn auto_complete(&self, ctx: &Context<'_>, focused: Option<&CommandOption>) -> Vec<Choice>;
}

/// Converts a runner failure into response content.
pub trait ErrorResponder: Send + Sync {
    /// Mutate `resp` according to `err`.
    fn respond_error(&self, ctx: &Context<'_>, resp: &mut Response, err: &anyhow::Error);
}

// ============================================================================
// Closure adapters
// ============================================================================

/// A closure used as a [`Runner`].
pub struct RunnerFn<F>(F);

impl<F> RunnerFn<F>
where
    F: Fn(&Context<'_>, &mut Response) -> RunResult + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Runner for RunnerFn<F>
where
    F: Fn(&Context<'_>, &mut Response) -> RunResult + Send + Sync,
{
    fn run(&self, ctx: &Context<'_>, resp: &mut Response) -> RunResult {
        (self.0)(ctx, resp)
    }
}

/// A closure used as an [`ErrorResponder`].
pub struct ErrorResponderFn<F>(F);

impl<F> ErrorResponderFn<F>
where
    F: Fn(&Context<'_>, &mut Response, &anyhow::Error) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ErrorResponder for ErrorResponderFn<F>
where
    F: Fn(&Context<'_>, &mut Response, &anyhow::Error) + Send + Sync,
{
    fn respond_error(&self, ctx: &Context<'_>, resp: &mut Response, err: &anyhow::Error) {
        (self.0)(ctx, resp, err)
    }
}

// ============================================================================
// Error responders
// ============================================================================

/// The built-in fallback: `"An error occurred: " + message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorResponder;

impl ErrorResponder for DefaultErrorResponder {
    fn respond_error(&self, _ctx: &Context<'_>, resp: &mut Response, err: &anyhow::Error) {
        resp.content(format!("{DEFAULT_ERROR_PREFIX}{err}"));
    }
}

/// Router-level responder with a configurable prefix and visibility.
#[derive(Debug, Clone)]
pub struct PrefixErrorResponder {
    prefix: String,
    ephemeral: bool,
}

impl PrefixErrorResponder {
    pub fn new(prefix: impl Into<String>, ephemeral: bool) -> Self {
        Self {
            prefix: prefix.into(),
            ephemeral,
        }
    }
}

impl Default for PrefixErrorResponder {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_PREFIX, false)
    }
}

impl ErrorResponder for PrefixErrorResponder {
    fn respond_error(&self, _ctx: &Context<'_>, resp: &mut Response, err: &anyhow::Error) {
        resp.content(format!("{}{err}", self.prefix));
        if self.ephemeral {
            resp.flags(false, true);
        }
    }
}
