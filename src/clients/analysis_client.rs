use crate::clients::{EntityClient, EntityResource};
use crate::domain::Analysis;
use tracing::{debug, instrument};

/// Client for the analysis collection resource.
#[derive(Clone)]
pub struct AnalysisClient {
    inner: EntityResource<Analysis>,
}

impl AnalysisClient {
    pub fn new(inner: EntityResource<Analysis>) -> Self {
        Self { inner }
    }

    /// Analyses in the cached collection that reference the given stock.
    #[instrument(skip(self))]
    pub fn cached_for_stock(&self, stock_id: i64) -> Vec<Analysis> {
        debug!("Reading cached collection");
        self.state()
            .entities
            .into_iter()
            .filter(|a| a.stock.as_ref().and_then(|s| s.id) == Some(stock_id))
            .collect()
    }
}

impl EntityClient<Analysis> for AnalysisClient {
    fn resource(&self) -> &EntityResource<Analysis> {
        &self.inner
    }
}
