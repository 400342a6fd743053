use std::collections::BTreeSet;

use catalog::products::Product;
use serde::Serialize;

/// Price ceiling used when the catalog has no valid price at all.
pub const DEFAULT_MAX_PRICE: f64 = 500.0;

/// Filter options offered for one catalog load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub perfume_types: Vec<String>,
    pub max_price: f64,
}

impl Facets {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            categories: distinct(products.iter().filter_map(Product::category)),
            perfume_types: distinct(products.iter().filter_map(Product::perfume_type)),
            max_price: products
                .iter()
                .filter_map(Product::valid_price)
                .reduce(f64::max)
                .unwrap_or(DEFAULT_MAX_PRICE),
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.binary_search_by(|c| c.as_str().cmp(category)).is_ok()
    }

    pub fn has_perfume_type(&self, perfume_type: &str) -> bool {
        self.perfume_types
            .binary_search_by(|t| t.as_str().cmp(perfume_type))
            .is_ok()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
