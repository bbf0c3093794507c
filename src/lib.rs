//! slashd - slash-command dispatch router.
//!
//! Binds command names to runners and turns inbound interaction events into
//! responses. The [`router`] module is the core; the rest wires it to a TCP
//! line transport, configuration, logging and Prometheus metrics for the
//! `slashd` daemon.

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod network;
pub mod router;
pub mod telemetry;
pub mod transport;

pub use error::{BindError, CommandError, TransportError};
pub use router::{
    AutoCompleter, CommandRoute, Context, ErrorResponder, Response, Router, RouterOptions,
    RunResult, Runner,
};
