use crate::clients::{EntityClient, EntityResource};
use crate::domain::Stock;
use tracing::{debug, instrument};

/// Client for the stock collection resource.
#[derive(Clone)]
pub struct StockClient {
    inner: EntityResource<Stock>,
}

impl StockClient {
    pub fn new(inner: EntityResource<Stock>) -> Self {
        Self { inner }
    }

    /// Looks a stock up in the cached collection without a network round trip.
    #[instrument(skip(self))]
    pub fn cached(&self, id: i64) -> Option<Stock> {
        debug!("Reading cached collection");
        self.state().entities.into_iter().find(|s| s.id == Some(id))
    }
}

impl EntityClient<Stock> for StockClient {
    fn resource(&self) -> &EntityResource<Stock> {
        &self.inner
    }
}
