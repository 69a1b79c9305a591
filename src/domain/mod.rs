//! Entity models implementing the [`RestEntity`](crate::framework::RestEntity) trait.
//!
//! Field sets mirror the server's domain exactly; relationships are simple
//! many-to-one references by id, with server-populated child collections on
//! the owning side.

pub mod analysis;
pub mod indicator;
pub mod portfolio;
pub mod position;
pub mod stock;

pub use analysis::*;
pub use indicator::*;
pub use portfolio::*;
pub use position::*;
pub use stock::*;
