//! Startup wiring and observability.
//!
//! - [`ApiSystem`] - builds the transport from config and hands it to every client
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod api_system;
pub mod tracing;

pub use api_system::*;
pub use tracing::*;
