use crate::clients::{EntityClient, EntityResource};
use crate::domain::Position;
use tracing::{debug, instrument};

/// Client for the position collection resource.
#[derive(Clone)]
pub struct PositionClient {
    inner: EntityResource<Position>,
}

impl PositionClient {
    pub fn new(inner: EntityResource<Position>) -> Self {
        Self { inner }
    }

    /// Positions in the cached collection held by the given portfolio.
    #[instrument(skip(self))]
    pub fn cached_in_portfolio(&self, portfolio_id: i64) -> Vec<Position> {
        debug!("Reading cached collection");
        self.state()
            .entities
            .into_iter()
            .filter(|p| p.portfolio.as_ref().and_then(|f| f.id) == Some(portfolio_id))
            .collect()
    }
}

impl EntityClient<Position> for PositionClient {
    fn resource(&self) -> &EntityResource<Position> {
        &self.inner
    }
}
