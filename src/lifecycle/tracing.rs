//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter driven by
//! `RUST_LOG`. The format is compact and hides module paths
//! (`with_target(false)`); every client call already opens a span carrying the
//! resource name, so the span hierarchy says where a line came from.
//!
//! ## Usage
//!
//! ```bash
//! # One line per notable event (registrations, login rejections)
//! RUST_LOG=info cargo run
//!
//! # Every request, with its span fields
//! RUST_LOG=debug cargo run
//!
//! # Also print each request as a copy-pasteable curl command
//! RUST_LOG=trace cargo run
//!
//! # Only the HTTP layer
//! RUST_LOG=api_framework::http=trace cargo run
//! ```
//!
//! ## What a request looks like
//!
//! With `RUST_LOG=debug` listing recipes prints:
//!
//! ```text
//! DEBUG list{filter=QueryFilter { page: Some(2), .. } resource="recipe"}: Sending request
//! DEBUG list{filter=QueryFilter { page: Some(2), .. } resource="recipe"}: Sending request method=GET url=http://localhost:8000/api/v1/recipes?page=2
//! DEBUG list{filter=QueryFilter { page: Some(2), .. } resource="recipe"}: Received response status=200 bytes=913
//! ```
//!
//! Page assembly that had to repair a pagination block logs at debug as well,
//! so a misbehaving server shows up without extra instrumentation.

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
