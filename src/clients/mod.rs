//! Type-safe clients wrapping the generic [`EntityResource`].

pub mod analysis_client;
pub mod entity_client;
pub mod indicator_client;
pub mod portfolio_client;
pub mod position_client;
pub mod resource_client;
pub mod stock_client;

pub use analysis_client::*;
pub use entity_client::*;
pub use indicator_client::*;
pub use portfolio_client::*;
pub use position_client::*;
pub use resource_client::*;
pub use stock_client::*;
