//! System wiring: startup configuration, the [`AdminSystem`] orchestrator,
//! and tracing setup.

pub mod admin_system;
pub mod tracing;

pub use self::admin_system::{AdminSystem, Config};
pub use self::tracing::setup_tracing;
