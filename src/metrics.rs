//! Prometheus metrics for slashd.
//!
//! - `slash_command_total{command}` - Command invocations by name
//! - `slash_command_duration_seconds{command}` - Runner latency histogram
//! - `slash_command_errors_total{command,error}` - Runner failures by kind
//! - `slash_autocomplete_total{command}` - Autocomplete requests by name
//! - `slash_events_ignored_total{reason}` - Events dropped without a response
//! - `slash_sessions_active` - Open gateway sessions
//!
//! Every recorder is a no-op until [`init`] has run, so embedding the router
//! without a metrics endpoint costs one atomic load per event.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

static METRICS: OnceLock<Metrics> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5];

struct Metrics {
    registry: Registry,
    commands: IntCounterVec,
    latency: HistogramVec,
    errors: IntCounterVec,
    autocomplete: IntCounterVec,
    ignored: IntCounterVec,
    sessions: IntGauge,
}

impl Metrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let commands = IntCounterVec::new(
            Opts::new("slash_command_total", "Commands invoked by name"),
            &["command"],
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new("slash_command_duration_seconds", "Runner latency by command")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["command"],
        )?;
        let errors = IntCounterVec::new(
            Opts::new("slash_command_errors_total", "Runner failures by command and kind"),
            &["command", "error"],
        )?;
        let autocomplete = IntCounterVec::new(
            Opts::new("slash_autocomplete_total", "Autocomplete requests by command"),
            &["command"],
        )?;
        let ignored = IntCounterVec::new(
            Opts::new("slash_events_ignored_total", "Events dropped without a response"),
            &["reason"],
        )?;
        let sessions = IntGauge::new("slash_sessions_active", "Open gateway sessions")?;

        registry.register(Box::new(commands.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(errors.clone()))?;
        registry.register(Box::new(autocomplete.clone()))?;
        registry.register(Box::new(ignored.clone()))?;
        registry.register(Box::new(sessions.clone()))?;

        Ok(Self {
            registry,
            commands,
            latency,
            errors,
            autocomplete,
            ignored,
            sessions,
        })
    }
}

/// Create and register all metrics. Later calls are no-ops.
pub fn init() {
    if METRICS.get().is_some() {
        return;
    }
    match Metrics::build() {
        Ok(metrics) => {
            let _ = METRICS.set(metrics);
        }
        Err(e) => tracing::error!(error = %e, "Failed to create metrics"),
    }
}

/// Encode every metric in Prometheus text format. Empty before [`init`].
pub fn gather_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

// ============================================================================
// Recording helpers
// ============================================================================

#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.commands.with_label_values(&[command]).inc();
        m.latency.with_label_values(&[command]).observe(duration_secs);
    }
}

/// `error` is a static code such as `CommandError::error_code`.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(m) = METRICS.get() {
        m.errors.with_label_values(&[command, error]).inc();
    }
}

#[inline]
pub fn record_autocomplete(command: &str) {
    if let Some(m) = METRICS.get() {
        m.autocomplete.with_label_values(&[command]).inc();
    }
}

#[inline]
pub fn record_ignored(reason: &str) {
    if let Some(m) = METRICS.get() {
        m.ignored.with_label_values(&[reason]).inc();
    }
}

#[inline]
pub fn session_opened() {
    if let Some(m) = METRICS.get() {
        m.sessions.inc();
    }
}

#[inline]
pub fn session_closed() {
    if let Some(m) = METRICS.get() {
        m.sessions.dec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_series_are_exported() {
        init();
        init();

        record_command("ping", 0.001);
        record_command_error("echo", "missing_option");
        record_ignored("unbound_command");

        let output = gather_metrics();
        assert!(output.contains("slash_command_total{command=\"ping\"}"));
        assert!(output.contains("slash_command_errors_total{command=\"echo\",error=\"missing_option\"}"));
        assert!(output.contains("slash_events_ignored_total{reason=\"unbound_command\"}"));
    }
}
