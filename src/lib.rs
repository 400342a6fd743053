//! # Zahra Perfumes
//!
//! Arabic storefront for a perfume shop: catalog browsing with filters, product pages and
//! ordering through WhatsApp, plus the dashboard routes that edit products and banners.
//!
//! ## Crates
//! - `catalog`: product and banner records, dashboard forms, remote and snapshot stores
//! - `filter`: products page filtering and query string sync
//! - `storefront`: HTTP API for the frontend
//! - `process`: snapshot cleanup tool
//!
//! ## Notes
//! - A few hundred products at most, every request filters the whole catalog in memory
//! - Categories in use: نسائي, رجالي, للجنسين

pub mod storefront;

pub use catalog;
pub use filter;
