//! # Catalog Filtering
//!
//! Everything the products page derives from a loaded catalog.
//!
//! ## Lifecycle
//! - Catalog facets (categories, perfume types, max price) are computed once per load
//! - Filter state is seeded from the location's query string, then changed by user input
//! - The listing is always recomputed from the whole catalog, never edited in place
//!
//! ## Faults
//! Nothing here fails. Unknown tokens are dropped, out of range prices are clamped and an
//! empty catalog simply lists nothing.
pub mod engine;
pub mod facets;
pub mod highlights;
pub mod navigation;
pub mod query;
pub mod related;
pub mod state;

pub use engine::FilterEngine;
pub use facets::Facets;
pub use navigation::{Navigator, QueryNavigator};
pub use state::{FilterState, PriceRange};
