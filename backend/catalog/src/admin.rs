//! # Dashboard Writes
//!
//! Products and banners as the admin dashboard edits them.
//!
//! Listings are newest first, undated rows last. A form never carries an `id` or `created_at`,
//! the store assigns both on insert and keeps them on update.
use std::cmp::Reverse;

use anyhow::Error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CatalogSource,
    products::{Banner, DEFAULT_LINK, Product},
};

/// Separator the products page uses between selected facet values.
pub const FACET_SEPARATOR: char = ',';

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("{0} cannot contain a comma")]
    Separator(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub perfume_type: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl ProductForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Missing("name"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FormError::InvalidPrice);
        }
        if self.category.trim().is_empty() {
            return Err(FormError::Missing("category"));
        }
        if self.category.contains(FACET_SEPARATOR) {
            return Err(FormError::Separator("category"));
        }
        if self
            .perfume_type
            .as_deref()
            .is_some_and(|perfume_type| perfume_type.contains(FACET_SEPARATOR))
        {
            return Err(FormError::Separator("perfume_type"));
        }

        Ok(())
    }

    /// Ratings are not edited from the dashboard and survive an update.
    pub fn into_product(
        self,
        id: u64,
        rating: Option<f64>,
        created_at: Option<DateTime<Utc>>,
    ) -> Product {
        Product {
            id,
            name: Some(self.name),
            description: self.description,
            category: Some(self.category),
            perfume_type: self.perfume_type,
            price: Some(self.price),
            image_urls: self.image_urls,
            rating,
            created_at,
        }
    }
}

fn default_link() -> Option<String> {
    Some(DEFAULT_LINK.to_string())
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerForm {
    pub image_url: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_link")]
    pub link_to: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl BannerForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.image_url.trim().is_empty() {
            return Err(FormError::Missing("image_url"));
        }
        if self.title.trim().is_empty() {
            return Err(FormError::Missing("title"));
        }

        Ok(())
    }

    pub fn into_banner(self, id: u64, created_at: Option<DateTime<Utc>>) -> Banner {
        Banner {
            id,
            image_url: self.image_url,
            title: self.title,
            subtitle: self.subtitle,
            link_to: self.link_to,
            is_active: self.is_active,
            created_at,
        }
    }
}

/// A catalog the dashboard can write to.
///
/// Updates and deletes of unknown ids are not errors: `None` and `false` report them.
#[async_trait]
pub trait CatalogStore: CatalogSource {
    /// Every product, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, Error>;

    async fn insert_product(&self, form: ProductForm) -> Result<Product, Error>;

    async fn update_product(&self, id: u64, form: ProductForm) -> Result<Option<Product>, Error>;

    async fn delete_product(&self, id: u64) -> Result<bool, Error>;

    /// Every banner, active or not, newest first.
    async fn list_banners(&self) -> Result<Vec<Banner>, Error>;

    async fn insert_banner(&self, form: BannerForm) -> Result<Banner, Error>;

    async fn update_banner(&self, id: u64, form: BannerForm) -> Result<Option<Banner>, Error>;

    async fn delete_banner(&self, id: u64) -> Result<bool, Error>;
}

pub fn newest_first<T, F>(rows: &mut [T], created_at: F)
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    // stable, undated rows sort below any date
    rows.sort_by_key(|row| Reverse(created_at(row)));
}

/// Next free id, one past the largest in use.
pub fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |id| id + 1)
}
