//! Gift giveaway server library.
//!
//! Exposes the HTTP API, configuration, and logging setup so integration
//! tests can drive the router directly.

pub mod api;
pub mod config;
pub mod logging;
