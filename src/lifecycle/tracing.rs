//! # Observability & Tracing
//!
//! Structured logging for the whole client.
//!
//! [`setup_tracing`] initializes the `tracing` subscriber with a compact
//! format that hides the crate/module prefix (`with_target(false)`); the
//! `entity_type` field on store and gateway events carries that context
//! instead. Log levels are configured through `RUST_LOG`:
//!
//! ```bash
//! # Request flow only
//! RUST_LOG=info cargo test
//!
//! # Full lifecycle events with payloads
//! RUST_LOG=debug cargo test
//!
//! # Filter to the framework
//! RUST_LOG=stockanalysis_client::framework=debug cargo test
//! ```
//!
//! What gets traced: store startup/shutdown and every applied lifecycle
//! event, each gateway request (method + URL), and list-refresh failures
//! after writes.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
