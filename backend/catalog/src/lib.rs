use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::info;

pub mod admin;
pub mod products;
pub mod remote;

use admin::{BannerForm, CatalogStore, ProductForm, newest_first, next_id};
use products::{Banner, Product};

/// Where a storefront session gets its catalog from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, Error>;

    /// Active banners, newest first.
    async fn fetch_active_banners(&self) -> Result<Vec<Banner>, Error>;
}

/// JSON snapshot of the catalog tables.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub banners: Vec<Banner>,
}

impl CatalogFile {
    pub fn active_banners(&self) -> Vec<Banner> {
        let mut banners: Vec<Banner> = self
            .banners
            .iter()
            .filter(|banner| banner.is_active)
            .cloned()
            .collect();

        newest_first(&mut banners, |banner| banner.created_at);
        banners
    }
}

pub async fn get_catalog(path: &Path) -> Result<CatalogFile, Error> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("reading catalog {}", path.display()))?;

    serde_json::from_slice(&data).with_context(|| format!("decoding catalog {}", path.display()))
}

pub async fn write_catalog(path: &Path, catalog: &CatalogFile) -> Result<(), Error> {
    let data = serde_json::to_vec_pretty(catalog)?;

    fs::write(path, data)
        .await
        .with_context(|| format!("writing catalog {}", path.display()))
}

/// Snapshot file read fresh on every fetch, so edits show up on refresh.
pub struct LocalCatalog {
    path: PathBuf,
    writes: Mutex<()>,
}

impl LocalCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: Mutex::new(()),
        }
    }

    /// Read, change and write back the snapshot, one edit at a time.
    async fn edit<T, F>(&self, change: F) -> Result<T, Error>
    where
        T: Send,
        F: FnOnce(&mut CatalogFile) -> T + Send,
    {
        let _guard = self.writes.lock().await;

        let mut catalog = get_catalog(&self.path).await?;
        let result = change(&mut catalog);
        write_catalog(&self.path, &catalog).await?;

        Ok(result)
    }
}

#[async_trait]
impl CatalogSource for LocalCatalog {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, Error> {
        Ok(get_catalog(&self.path).await?.products)
    }

    async fn fetch_active_banners(&self) -> Result<Vec<Banner>, Error> {
        Ok(get_catalog(&self.path).await?.active_banners())
    }
}

#[async_trait]
impl CatalogStore for LocalCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        let mut products = get_catalog(&self.path).await?.products;
        newest_first(&mut products, |product| product.created_at);

        Ok(products)
    }

    async fn insert_product(&self, form: ProductForm) -> Result<Product, Error> {
        let product = self
            .edit(|catalog| {
                let id = next_id(catalog.products.iter().map(|product| product.id));
                let product = form.into_product(id, None, Some(Utc::now()));

                catalog.products.push(product.clone());
                product
            })
            .await?;
        info!("Inserted product {}", product.id);

        Ok(product)
    }

    async fn update_product(&self, id: u64, form: ProductForm) -> Result<Option<Product>, Error> {
        self.edit(|catalog| {
            let slot = catalog.products.iter_mut().find(|product| product.id == id)?;
            *slot = form.into_product(id, slot.rating, slot.created_at);

            Some(slot.clone())
        })
        .await
    }

    async fn delete_product(&self, id: u64) -> Result<bool, Error> {
        self.edit(|catalog| {
            let before = catalog.products.len();
            catalog.products.retain(|product| product.id != id);

            catalog.products.len() != before
        })
        .await
    }

    async fn list_banners(&self) -> Result<Vec<Banner>, Error> {
        let mut banners = get_catalog(&self.path).await?.banners;
        newest_first(&mut banners, |banner| banner.created_at);

        Ok(banners)
    }

    async fn insert_banner(&self, form: BannerForm) -> Result<Banner, Error> {
        let banner = self
            .edit(|catalog| {
                let id = next_id(catalog.banners.iter().map(|banner| banner.id));
                let banner = form.into_banner(id, Some(Utc::now()));

                catalog.banners.push(banner.clone());
                banner
            })
            .await?;
        info!("Inserted banner {}", banner.id);

        Ok(banner)
    }

    async fn update_banner(&self, id: u64, form: BannerForm) -> Result<Option<Banner>, Error> {
        self.edit(|catalog| {
            let slot = catalog.banners.iter_mut().find(|banner| banner.id == id)?;
            *slot = form.into_banner(id, slot.created_at);

            Some(slot.clone())
        })
        .await
    }

    async fn delete_banner(&self, id: u64) -> Result<bool, Error> {
        self.edit(|catalog| {
            let before = catalog.banners.len();
            catalog.banners.retain(|banner| banner.id != id);

            catalog.banners.len() != before
        })
        .await
    }
}
