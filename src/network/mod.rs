//! Network module.
//!
//! Contains the Gateway (TCP listener) that feeds connections to the router.

mod gateway;

pub use gateway::Gateway;
