use crate::clients::{EntityClient, EntityResource};
use crate::domain::Indicator;
use tracing::{debug, instrument};

/// Client for the indicator collection resource.
#[derive(Clone)]
pub struct IndicatorClient {
    inner: EntityResource<Indicator>,
}

impl IndicatorClient {
    pub fn new(inner: EntityResource<Indicator>) -> Self {
        Self { inner }
    }

    /// Indicators in the cached collection that belong to the given analysis.
    #[instrument(skip(self))]
    pub fn cached_for_analysis(&self, analysis_id: i64) -> Vec<Indicator> {
        debug!("Reading cached collection");
        self.state()
            .entities
            .into_iter()
            .filter(|i| i.analysis.as_ref().and_then(|a| a.id) == Some(analysis_id))
            .collect()
    }
}

impl EntityClient<Indicator> for IndicatorClient {
    fn resource(&self) -> &EntityResource<Indicator> {
        &self.inner
    }
}
