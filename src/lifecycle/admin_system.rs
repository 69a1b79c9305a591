use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{
    AnalysisClient, EntityResource, IndicatorClient, PortfolioClient, PositionClient, StockClient,
};
use crate::domain::{Analysis, Indicator, Portfolio, Position, Stock};
use crate::framework::{EntityGateway, EntityStore, HttpTransport, RestEntity, Transport};

/// Startup configuration for an [`AdminSystem`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the REST surface, e.g. `http://localhost:8080/api`.
    pub api_root: String,
    /// Buffer size of each store's event channel.
    pub store_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_root: "http://localhost:8080/api".to_string(),
            store_capacity: 32,
        }
    }
}

impl Config {
    /// Reads the API root from the `STOCK_ADMIN_API` environment variable,
    /// falling back to the default when unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_root) = std::env::var("STOCK_ADMIN_API") {
            config.api_root = api_root;
        }
        config
    }
}

/// The runtime orchestrator for the stock-analysis administration client.
///
/// `AdminSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the per-entity stores
/// - **Wiring**: Building one gateway + store + client per entity type over a
///   shared transport
///
/// There are no ambient singletons: the system is constructed at startup and
/// its clients are passed by reference (or cloned) into whatever consumes
/// them.
///
/// # Example
///
/// ```ignore
/// let system = AdminSystem::new(Config::from_env());
///
/// system.stocks.fetch_all(ListQuery::default()).await?;
/// let stock = system.stocks.create(Stock::new("Acme", "Industrials")).await?;
///
/// system.shutdown().await?;
/// ```
pub struct AdminSystem {
    pub stocks: StockClient,
    pub analyses: AnalysisClient,
    pub indicators: IndicatorClient,
    pub portfolios: PortfolioClient,
    pub positions: PositionClient,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl AdminSystem {
    /// Creates a fully wired system over a `reqwest`-backed transport.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates the system over a caller-supplied transport (tests inject a
    /// mock here).
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let mut handles = Vec::new();

        fn resource<T: RestEntity>(
            config: &Config,
            transport: &Arc<dyn Transport>,
            handles: &mut Vec<tokio::task::JoinHandle<()>>,
        ) -> EntityResource<T> {
            let (store, handle) = EntityStore::new(config.store_capacity);
            handles.push(tokio::spawn(store.run()));
            EntityResource::new(
                EntityGateway::new(transport.clone(), config.api_root.clone()),
                handle,
            )
        }

        let stocks = StockClient::new(resource::<Stock>(&config, &transport, &mut handles));
        let analyses = AnalysisClient::new(resource::<Analysis>(&config, &transport, &mut handles));
        let indicators =
            IndicatorClient::new(resource::<Indicator>(&config, &transport, &mut handles));
        let portfolios =
            PortfolioClient::new(resource::<Portfolio>(&config, &transport, &mut handles));
        let positions = PositionClient::new(resource::<Position>(&config, &transport, &mut handles));

        info!(api_root = %config.api_root, "Admin system started");

        Self {
            stocks,
            analyses,
            indicators,
            portfolios,
            positions,
            handles,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes each store's event channel; every store
    /// task then drains its queue and exits. Returns an error if any store
    /// task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down admin system...");

        drop(self.stocks);
        drop(self.analyses);
        drop(self.indicators);
        drop(self.portfolios);
        drop(self.positions);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Admin system shutdown complete.");
        Ok(())
    }
}
