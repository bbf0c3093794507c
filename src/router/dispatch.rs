//! The router: binding operations and the dispatch entry point.
//!
//! ## Dispatch states
//!
//! - unbound command: no response, event dropped
//! - `Command` event: run path, always produces a channel message
//! - `Autocomplete` event: suggestion path, always produces a (possibly
//!   empty) suggestion list
//! - any other kind: no response
//!
//! Runner failures never escape [`Router::dispatch`]; they are rendered by
//! exactly one error responder, chosen route first, then router default.

use std::sync::Arc;

use slash_proto::{Event, EventKind, InteractionResponse};
use tracing::{Level, debug, span, trace, warn};

use super::context::Context;
use super::registry::{Registry, normalize};
use super::response::Response;
use super::route::{CommandRoute, Route};
use super::traits::{DefaultErrorResponder, ErrorResponder, Runner};
use crate::error::{BindError, TransportError, failure_code};
use crate::telemetry::CommandTimer;
use crate::transport::Transport;

/// Construction options for [`Router`].
#[derive(Clone, Default)]
pub struct RouterOptions {
    /// Router-wide error responder. `None` installs [`DefaultErrorResponder`].
    pub error_responder: Option<Arc<dyn ErrorResponder>>,
}

/// Binds command names to routes and dispatches events to them.
pub struct Router {
    registry: Registry,
    error_responder: Arc<dyn ErrorResponder>,
}

impl Router {
    /// Create a router without any commands.
    pub fn new(options: RouterOptions) -> Self {
        let error_responder = options
            .error_responder
            .unwrap_or_else(|| Arc::new(DefaultErrorResponder));

        Self {
            registry: Registry::new(),
            error_responder,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The router-level error responder (configured or built-in).
    #[inline]
    pub fn error_responder(&self) -> &Arc<dyn ErrorResponder> {
        &self.error_responder
    }

    // ========================================================================
    // Binding
    // ========================================================================

    /// Bind `cmd` to `name`, replacing any existing binding.
    ///
    /// Names are case-insensitive and stored in lower case. The registry is
    /// untouched when validation fails.
    pub fn bind(&self, name: &str, cmd: CommandRoute) -> Result<(), BindError> {
        let route = Route::validate(name, cmd)?;
        let replaced = self.registry.insert(name, route).is_some();
        debug!(command = %normalize(name), replaced, "Command bound");
        Ok(())
    }

    /// Bind every entry with [`bind`](Self::bind).
    ///
    /// Not transactional: stops at the first invalid entry and keeps the
    /// entries bound before it.
    pub fn bind_all<I, S>(&self, cmds: I) -> Result<(), BindError>
    where
        I: IntoIterator<Item = (S, CommandRoute)>,
        S: AsRef<str>,
    {
        for (name, cmd) in cmds {
            self.bind(name.as_ref(), cmd)?;
        }
        Ok(())
    }

    /// Bind a bare runner, attaching the optional capabilities it advertises.
    ///
    /// Always builds a fresh route; nothing from a previous binding under the
    /// same name survives.
    pub fn auto_bind(&self, name: &str, runner: Arc<dyn Runner>) -> Result<(), BindError> {
        self.bind(name, CommandRoute::detect(runner))
    }

    /// [`auto_bind`](Self::auto_bind) every entry, with the same failure
    /// discipline as [`bind_all`](Self::bind_all).
    pub fn auto_bind_all<I, S>(&self, runners: I) -> Result<(), BindError>
    where
        I: IntoIterator<Item = (S, Arc<dyn Runner>)>,
        S: AsRef<str>,
    {
        for (name, runner) in runners {
            self.auto_bind(name.as_ref(), runner)?;
        }
        Ok(())
    }

    /// Remove the binding for `name`. Returns whether one existed.
    pub fn unbind(&self, name: &str) -> bool {
        let removed = self.registry.remove(name).is_some();
        if removed {
            debug!(command = %normalize(name), "Command unbound");
        }
        removed
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Arc<Route>> {
        self.registry.lookup(name)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Handle one event and return the response to send, if any.
    pub fn dispatch(&self, event: &Event) -> Option<InteractionResponse> {
        let Some(route) = self.registry.lookup(&event.command) else {
            trace!(command = %event.command, id = %event.id, "Ignoring unbound command");
            crate::metrics::record_ignored("unbound_command");
            return None;
        };

        let command = normalize(&event.command);
        let dispatch_span = span!(
            Level::DEBUG,
            "slash.command",
            command = %command,
            kind = %event.kind,
            id = %event.id,
        );
        let _entered = dispatch_span.enter();

        let ctx = Context::new(event, &self.registry);
        match event.kind {
            EventKind::Command => Some(self.run(&command, &ctx, &route)),
            EventKind::Autocomplete => Some(self.auto_complete(&command, &ctx, &route)),
            EventKind::Other => {
                trace!("Ignoring unsupported event kind");
                crate::metrics::record_ignored("unsupported_kind");
                None
            }
        }
    }

    /// Run path. Failures are absorbed into the response.
    fn run(&self, command: &str, ctx: &Context<'_>, route: &Route) -> InteractionResponse {
        route.record_invocation();
        let timer = CommandTimer::new(command);

        let mut resp = Response::new();
        let result = route.runner().run(ctx, &mut resp);
        trace!(elapsed_us = timer.elapsed().as_micros() as u64, ok = result.is_ok(), "Runner returned");

        if let Err(err) = result {
            debug!(error = %err, "Command failed");
            crate::metrics::record_command_error(command, failure_code(&err));
            self.resolve_error_responder(route)
                .respond_error(ctx, &mut resp, &err);
        }

        InteractionResponse::message(resp.into_data())
    }

    /// Suggestion path. A route without a completer yields an empty list.
    fn auto_complete(&self, command: &str, ctx: &Context<'_>, route: &Route) -> InteractionResponse {
        crate::metrics::record_autocomplete(command);

        let choices = match route.auto_completer() {
            Some(completer) => completer.auto_complete(ctx, ctx.focused_option()),
            None => Vec::new(),
        };
        InteractionResponse::autocomplete(choices)
    }

    /// Route responder if attached, otherwise the router's.
    fn resolve_error_responder<'r>(&'r self, route: &'r Route) -> &'r Arc<dyn ErrorResponder> {
        route.error_responder().unwrap_or(&self.error_responder)
    }

    // ========================================================================
    // Transport glue
    // ========================================================================

    /// Dispatch `event` and hand the response, if any, to `transport`.
    ///
    /// Send failures are logged and dropped.
    pub async fn route<T>(&self, transport: &mut T, event: Event)
    where
        T: Transport + ?Sized,
    {
        let Some(response) = self.dispatch(&event) else {
            return;
        };

        if let Err(e) = transport.respond(&event, response).await {
            warn!(id = %event.id, command = %event.command, error = %e, "Failed to send response");
        }
    }

    /// Route events from `transport` until it reports end of stream.
    pub async fn serve<T>(&self, transport: &mut T) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        while let Some(event) = transport.receive().await? {
            self.route(transport, event).await;
        }
        Ok(())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouterOptions::default())
    }
}
