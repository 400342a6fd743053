//! # Catalog Maintenance
//!
//! Cleans a catalog snapshot before it is served or imported into the hosted backend.
//!
//! ## Why
//! Products are typed in by hand from the dashboard. Stray spaces, underscores and invisible
//! direction marks split one category into several filter checkboxes.
//!
//! ## Steps
//! 1. Load the snapshot
//! 2. Sanitize names, categories and perfume types, trim descriptions. Commas in categories and
//!    perfume types become spaces, the products page query string splits on them
//! 3. Drop prices that are negative or not finite so they never reach the price slider
//! 4. Write the snapshot back and report the facets the products page will offer
use std::path::Path;

use anyhow::Error;
use catalog::{CatalogFile, get_catalog, write_catalog};
use filter::Facets;

pub mod utils;

use utils::{sanitize_facet, sanitize_label, trim_text};

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub products: usize,
    pub changed: usize,
    pub dropped_prices: usize,
    pub facets: Facets,
}

pub async fn process_catalog(input: &Path, output: &Path) -> Result<Report, Error> {
    let mut catalog = get_catalog(input).await?;

    println!("Loaded Products: {}", catalog.products.len());
    println!("Loaded Banners: {}\n", catalog.banners.len());

    let report = normalize_catalog(&mut catalog);
    write_catalog(output, &catalog).await?;

    Ok(report)
}

pub fn normalize_catalog(catalog: &mut CatalogFile) -> Report {
    let mut changed = 0;
    let mut dropped_prices = 0;

    for product in &mut catalog.products {
        let before = product.clone();

        product.name = sanitize_label(product.name.take());
        product.category = sanitize_facet(product.category.take());
        product.perfume_type = sanitize_facet(product.perfume_type.take());
        product.description = trim_text(product.description.take());

        if product.price.is_some() && product.valid_price().is_none() {
            #[cfg(feature = "verbose")]
            println!("Dropping price of product {}", product.id);

            product.price = None;
            dropped_prices += 1;
        }

        if *product != before {
            changed += 1;
        }
    }

    Report {
        products: catalog.products.len(),
        changed,
        dropped_prices,
        facets: Facets::from_products(&catalog.products),
    }
}
