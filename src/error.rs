//! Unified error handling for slashd.
//!
//! Binding errors are programmer errors and abort registration. Command and
//! transport errors are recoverable: the former become responses, the latter
//! are logged by whoever drives the transport.

use slash_proto::ProtocolError;
use thiserror::Error;

// ============================================================================
// Binding Errors (registration)
// ============================================================================

/// Invalid binding request. Raised before the registry is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("route for '{name}' has no runner")]
    MissingRunner { name: String },
}

// ============================================================================
// Command Errors (builtin runners)
// ============================================================================

/// Failures reported by the builtin commands.
///
/// Runners return `anyhow::Error`, so any error type works; this enum exists
/// so the builtins share wording and metric labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("missing required option: {0}")]
    MissingOption(String),

    #[error("option '{name}' must be {expected}")]
    InvalidOption { name: String, expected: &'static str },

    #[error("no entry matches '{0}'")]
    NoMatch(String),
}

impl CommandError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingOption(_) => "missing_option",
            Self::InvalidOption { .. } => "invalid_option",
            Self::NoMatch(_) => "no_match",
        }
    }
}

/// Metric label for an arbitrary runner failure.
pub fn failure_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<CommandError>() {
        Some(e) => e.error_code(),
        None => "runner_failed",
    }
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Errors surfaced by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("transport closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_code_sees_through_anyhow() {
        let err = anyhow::Error::from(CommandError::MissingOption("text".into()));
        assert_eq!(failure_code(&err), "missing_option");
        assert_eq!(err.to_string(), "missing required option: text");

        let err = anyhow::anyhow!("boom");
        assert_eq!(failure_code(&err), "runner_failed");
    }
}
