//! # Catalog Records
//!
//! Rows as the hosted backend returns them from the `products` and `banners` tables.
//!
//! ## Leniency
//! - Prices may be JSON numbers or numeric strings, anything else becomes `None` instead of failing
//!   the whole catalog
//! - `image_urls` may be `null`, read as an empty list
//! - Empty strings are kept as-is here, the filter engine treats them as absent
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_LINK: &str = "/products";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub perfume_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Non-empty category, if any.
    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn perfume_type(&self) -> Option<&str> {
        non_empty(&self.perfume_type)
    }

    /// Price usable for range filtering: finite and not negative.
    pub fn valid_price(&self) -> Option<f64> {
        self.price.filter(|price| price.is_finite() && *price >= 0.0)
    }

    /// Price compared against the selected range. Unpriced products sit at `0`, invalid ones
    /// (negative) have no place in any range.
    pub fn listing_price(&self) -> Option<f64> {
        match self.price {
            None => Some(0.0),
            Some(_) => self.valid_price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: u64,
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub link_to: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of the home page carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub link_to: String,
}

impl From<Banner> for Slide {
    fn from(banner: Banner) -> Self {
        Self {
            image_url: banner.image_url,
            title: banner.title,
            subtitle: banner.subtitle,
            link_to: banner
                .link_to
                .filter(|link| !link.is_empty())
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
        }
    }
}

pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide {
            image_url: "https://placehold.co/1920x1080/a65b86/ffffff?text=Zahra+Perfumes+Banner+1"
                .to_string(),
            title: "عطور فاخرة لكل مناسبة".to_string(),
            subtitle: "اكتشف تشكيلتنا المميزة من العطور العالمية والشرقية".to_string(),
            link_to: DEFAULT_LINK.to_string(),
        },
        Slide {
            image_url: "https://placehold.co/1920x1080/8f436a/ffffff?text=Zahra+Perfumes+Banner+2"
                .to_string(),
            title: "نفحات من الطبيعة".to_string(),
            subtitle: "أفضل المكونات لعطر يدوم".to_string(),
            link_to: DEFAULT_LINK.to_string(),
        },
    ]
}

/// Carousel slides for the given active banners, falling back to the built-in ones.
pub fn slides_from_banners(banners: Vec<Banner>) -> Vec<Slide> {
    if banners.is_empty() {
        return default_slides();
    }

    banners.into_iter().map(Slide::from).collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(number.filter(|number| number.is_finite()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
