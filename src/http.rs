//! Operator HTTP endpoint.
//!
//! - `GET /metrics` - Prometheus text exposition
//! - `GET /commands` - bound command names, one per line, with invocation counts

use std::fmt::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;

use crate::router::Router;

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

async fn commands_handler(State(router): State<Arc<Router>>) -> String {
    let registry = router.registry();
    let mut body = String::new();
    for name in registry.names() {
        let count = registry.lookup(&name).map_or(0, |r| r.invocations());
        let _ = writeln!(body, "{name} {count}");
    }
    body
}

/// Build the HTTP routes.
pub fn app(router: Arc<Router>) -> axum::Router {
    axum::Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/commands", get(commands_handler))
        .with_state(router)
}

/// Serve the operator endpoint on `0.0.0.0:port` until the task is dropped.
///
/// Bind failures are logged; the daemon keeps dispatching without it.
pub async fn run_http_server(port: u16, router: Arc<Router>) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind HTTP server");
            return;
        }
    };
    tracing::info!(%addr, "HTTP server listening");

    if let Err(e) = axum::serve(listener, app(router)).await {
        tracing::error!(error = %e, "HTTP server error");
    }
}
