//! slashd - slash-command dispatch daemon.
//!
//! Serves the builtin commands to line-delimited JSON clients over TCP.

use slashd::commands::register_builtin;
use slashd::config::{Config, LogFormat, validate};
use slashd::network::Gateway;
use slashd::router::{ErrorResponder, PrefixErrorResponder, Router, RouterOptions};
use slashd::{http, metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {config_path}: {e}");
            return Err(e.into());
        }
    };

    init_tracing(config.logging.format);

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {config_path}", errors.len());
    }

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        "Starting slashd"
    );

    let options = RouterOptions {
        error_responder: config.errors.as_ref().map(|e| {
            Arc::new(PrefixErrorResponder::new(e.prefix.clone(), e.ephemeral))
                as Arc<dyn ErrorResponder>
        }),
    };
    let router = Arc::new(Router::new(options));
    register_builtin(&router, &config.search)?;

    match config.server.metrics_port() {
        None => info!("Metrics disabled"),
        Some(metrics_port) => {
            metrics::init();
            info!("Metrics initialized");

            tokio::spawn(http::run_http_server(metrics_port, Arc::clone(&router)));
        }
    }

    let gateway = Gateway::bind(config.listen.address, config.listen.max_frame, router).await?;

    tokio::select! {
        result = gateway.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }

    Ok(())
}
