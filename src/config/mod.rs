//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`validation`]: Startup checks that collect every problem at once

mod types;
mod validation;

pub use types::{
    Config, ConfigError, ErrorsConfig, ListenConfig, LogFormat, LoggingConfig, SearchConfig,
    ServerConfig,
};
pub use validation::{MIN_MAX_FRAME, ValidationError, validate};
