//! Error types shared across the client framework.

use thiserror::Error;

/// Errors surfaced by gateways, stores, and validation.
///
/// All failures are terminal for the call that produced them: there is no
/// retry, no backoff, and no distinction between transient and permanent
/// faults. Network and HTTP errors additionally land in the store's
/// `error_message`, where presentation layers pick them up.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The transport could not reach the server at all.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The server reported no resource under the requested id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A client-side required-field check failed; the request was never sent.
    #[error("Validation failed: {field} must not be null")]
    Validation { field: &'static str },

    /// The response body could not be decoded into the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The entity store's event loop has shut down.
    #[error("Store closed")]
    StoreClosed,
}
