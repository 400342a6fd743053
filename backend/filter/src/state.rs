use std::collections::BTreeSet;

use serde::Serialize;

/// Closed price interval, always within `[0, ceiling]` once clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn full(ceiling: f64) -> Self {
        Self {
            min: 0.0,
            max: ceiling,
        }
    }

    /// NaN bounds fall back to the full range, swapped bounds are reordered.
    pub fn clamped(min: f64, max: f64, ceiling: f64) -> Self {
        let clamp = |value: f64, fallback: f64| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(0.0, ceiling)
            }
        };

        let (min, max) = (clamp(min, 0.0), clamp(max, ceiling));

        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub price_range: PriceRange,
    pub categories: BTreeSet<String>,
    pub perfume_types: BTreeSet<String>,
    pub search: String,
}

impl FilterState {
    pub fn new(ceiling: f64) -> Self {
        Self {
            price_range: PriceRange::full(ceiling),
            categories: BTreeSet::new(),
            perfume_types: BTreeSet::new(),
            search: String::new(),
        }
    }

    /// Search term as matched and serialized.
    pub fn trimmed_search(&self) -> &str {
        self.search.trim()
    }
}
