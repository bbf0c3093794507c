//! Command routing core.
//!
//! This module contains the binding registry and the dispatch engine:
//!
//! - [`Router`]: binding operations and the dispatch entry point
//! - [`Registry`]: case-insensitive name → [`Route`] map
//! - [`Context`] / [`Response`]: per-invocation input view and output builder
//! - [`Runner`], [`AutoCompleter`], [`ErrorResponder`]: handler capabilities

pub mod context;
pub mod dispatch;
pub mod registry;
pub mod response;
pub mod route;
pub mod traits;

pub use context::Context;
pub use dispatch::{Router, RouterOptions};
pub use registry::{Registry, normalize};
pub use response::Response;
pub use route::{CommandRoute, Route};
pub use traits::{
    AutoCompleter, DEFAULT_ERROR_PREFIX, DefaultErrorResponder, ErrorResponder, ErrorResponderFn,
    PrefixErrorResponder, RunResult, Runner, RunnerFn,
};
