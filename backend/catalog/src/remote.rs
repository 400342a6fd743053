use anyhow::{Context, Error, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    CatalogSource,
    admin::{BannerForm, CatalogStore, ProductForm},
    products::{Banner, Product},
};

const PRODUCTS_TABLE: &str = "/rest/v1/products";
const BANNERS_TABLE: &str = "/rest/v1/banners";

const ALL: &str = "?select=*";
const NEWEST_FIRST: &str = "?select=*&order=created_at.desc.nullslast";
const ACTIVE_NEWEST_FIRST: &str = "?select=*&is_active=eq.true&order=created_at.desc.nullslast";

/// Hosted backend exposing the catalog tables over REST.
pub struct RemoteCatalog {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteCatalog {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Rows returned by the request, writes ask for the rows they touched.
    async fn rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<Vec<T>, Error> {
        let response = request
            .send()
            .await
            .with_context(|| format!("requesting {path}"))?
            .error_for_status()?;

        let rows: Vec<T> = response.json().await?;
        debug!("Got {} rows from {path}", rows.len());

        Ok(rows)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        self.rows(self.request(Method::GET, path), path).await
    }

    async fn write<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let mut request = self
            .request(method, path)
            .header("Prefer", "return=representation");
        if let Some(body) = body {
            request = request.json(body);
        }

        self.rows(request, path).await
    }

    async fn insert<T, B>(&self, table: &str, form: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        self.write(Method::POST, table, Some(form))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("insert into {table} returned no row"))
    }

    async fn update<T, B>(&self, table: &str, id: u64, form: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let path = format!("{table}?id=eq.{id}");

        let updated = self.write(Method::PATCH, &path, Some(form)).await?;

        Ok(updated.into_iter().next())
    }

    async fn delete(&self, table: &str, id: u64) -> Result<bool, Error> {
        let path = format!("{table}?id=eq.{id}");
        let deleted: Vec<Value> = self.write::<_, ()>(Method::DELETE, &path, None).await?;

        Ok(!deleted.is_empty())
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, Error> {
        self.fetch(&format!("{PRODUCTS_TABLE}{ALL}")).await
    }

    async fn fetch_active_banners(&self) -> Result<Vec<Banner>, Error> {
        self.fetch(&format!("{BANNERS_TABLE}{ACTIVE_NEWEST_FIRST}")).await
    }
}

#[async_trait]
impl CatalogStore for RemoteCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.fetch(&format!("{PRODUCTS_TABLE}{NEWEST_FIRST}")).await
    }

    async fn insert_product(&self, form: ProductForm) -> Result<Product, Error> {
        let product: Product = self.insert(PRODUCTS_TABLE, &form).await?;
        info!("Inserted product {}", product.id);

        Ok(product)
    }

    async fn update_product(&self, id: u64, form: ProductForm) -> Result<Option<Product>, Error> {
        self.update(PRODUCTS_TABLE, id, &form).await
    }

    async fn delete_product(&self, id: u64) -> Result<bool, Error> {
        self.delete(PRODUCTS_TABLE, id).await
    }

    async fn list_banners(&self) -> Result<Vec<Banner>, Error> {
        self.fetch(&format!("{BANNERS_TABLE}{NEWEST_FIRST}")).await
    }

    async fn insert_banner(&self, form: BannerForm) -> Result<Banner, Error> {
        let banner: Banner = self.insert(BANNERS_TABLE, &form).await?;
        info!("Inserted banner {}", banner.id);

        Ok(banner)
    }

    async fn update_banner(&self, id: u64, form: BannerForm) -> Result<Option<Banner>, Error> {
        self.update(BANNERS_TABLE, id, &form).await
    }

    async fn delete_banner(&self, id: u64) -> Result<bool, Error> {
        self.delete(BANNERS_TABLE, id).await
    }
}
