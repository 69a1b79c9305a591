use crate::clients::{EntityClient, EntityResource};
use crate::domain::Portfolio;

/// Client for the portfolio collection resource.
#[derive(Clone)]
pub struct PortfolioClient {
    inner: EntityResource<Portfolio>,
}

impl PortfolioClient {
    pub fn new(inner: EntityResource<Portfolio>) -> Self {
        Self { inner }
    }
}

impl EntityClient<Portfolio> for PortfolioClient {
    fn resource(&self) -> &EntityResource<Portfolio> {
        &self.inner
    }
}
