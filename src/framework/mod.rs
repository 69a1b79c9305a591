//! Generic entity-resource framework.
//!
//! This module provides the building blocks for synchronizing a client-side
//! entity cache with a remote REST collection resource.
//!
//! # Main Components
//!
//! - [`RestEntity`] - Trait that entity types implement to be managed here
//! - [`EntityStore`] / [`StoreHandle`] - Single-owner state task per entity type
//! - [`reduce`] - Pure request-lifecycle reducer
//! - [`EntityGateway`] - REST adapter for the five operations
//! - [`ClientError`] - Common error taxonomy
//!
//! # Testing
//!
//! See [`mock`] for a transport that replays canned responses.

pub mod core;
pub mod error;
pub mod gateway;
pub mod mock;

// Re-export the main types for convenience
pub use self::core::*;
pub use self::error::ClientError;
pub use self::gateway::{clean_body, EntityGateway, HttpTransport, ListQuery, Transport};
