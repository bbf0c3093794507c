//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest `listen.max_frame` that still fits a realistic event.
pub const MIN_MAX_FRAME: usize = 512;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("listen.max_frame must be at least {MIN_MAX_FRAME}, got {0}")]
    MaxFrameTooSmall(usize),
    #[error("search.entries must not be empty")]
    EmptySearchEntries,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    if config.listen.max_frame < MIN_MAX_FRAME {
        errors.push(ValidationError::MaxFrameTooSmall(config.listen.max_frame));
    }

    if config.search.entries.is_empty() {
        errors.push(ValidationError::EmptySearchEntries);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
