use std::sync::Arc;

use catalog::{
    LocalCatalog,
    admin::CatalogStore,
    products::{Product, Slide, default_slides, slides_from_banners},
    remote::RemoteCatalog,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::config::{CatalogConfig, Config, ConfigError};

pub struct AppState {
    pub config: Config,
    source: Arc<dyn CatalogStore>,
    products: RwLock<Arc<[Product]>>,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, ConfigError> {
        let config = Config::load()?;

        let source: Arc<dyn CatalogStore> = match &config.catalog {
            CatalogConfig::Local(path) => Arc::new(LocalCatalog::new(path.clone())),
            CatalogConfig::Remote { url, key } => Arc::new(RemoteCatalog::new(url, key)),
        };

        Ok(Self::with_source(config, source).await)
    }

    /// A catalog that fails to load is served as empty until the next refresh.
    pub async fn with_source(config: Config, source: Arc<dyn CatalogStore>) -> Arc<Self> {
        let products = source.fetch_all_products().await.unwrap_or_else(|e| {
            warn!("Failed to load catalog, starting empty: {e:#}");
            Vec::new()
        });
        info!("Loaded {} products", products.len());

        Arc::new(Self {
            config,
            source,
            products: RwLock::new(products.into()),
        })
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.source.as_ref()
    }

    pub async fn products(&self) -> Arc<[Product]> {
        self.products.read().await.clone()
    }

    /// Swaps in a fresh catalog, the previous one stays on failure.
    pub async fn refresh(&self) -> Result<usize, anyhow::Error> {
        let products = self.source.fetch_all_products().await?;
        let count = products.len();

        *self.products.write().await = products.into();
        info!("Refreshed catalog with {count} products");

        Ok(count)
    }

    /// Picks up a dashboard write. A failed reload only delays it until the next refresh.
    pub async fn catalog_changed(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Failed to reload catalog after a write: {e:#}");
        }
    }

    pub async fn slides(&self) -> Vec<Slide> {
        match self.source.fetch_active_banners().await {
            Ok(banners) => slides_from_banners(banners),
            Err(e) => {
                warn!("Failed to fetch banners, using defaults: {e:#}");
                default_slides()
            }
        }
    }
}
