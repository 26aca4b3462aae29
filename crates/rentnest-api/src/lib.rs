//! Rentnest API library
//!
//! Exposes the router, state and setup so integration tests can drive the
//! same application the binary serves.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
