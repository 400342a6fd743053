//! # Filter Engine
//!
//! Derives the product listing from the catalog and the current filter state, and keeps the
//! state mirrored in the location's query string.
//!
//! ## Filtering
//! Every stage works on the whole catalog and all of them must hold:
//! 1. price within the selected range, an unpriced product counts as `0` and a negative price
//!    never passes
//! 2. category in the selected categories, if any are selected
//! 3. perfume type in the selected types, if any are selected
//! 4. trimmed search term found, ignoring case, in name, description, category or perfume type
//!
//! ## Sync
//! After each mutation the state is serialized and, when the string changed, handed to
//! [`Navigator::replace`]. Price never reaches the query string so moving the slider only re-filters.
use std::sync::Arc;

use catalog::products::Product;
use tracing::{debug, trace};

use crate::{
    facets::Facets,
    navigation::Navigator,
    query,
    state::{FilterState, PriceRange},
};

pub struct FilterEngine<N> {
    products: Arc<[Product]>,
    facets: Facets,
    state: FilterState,
    filtered: Vec<usize>,
    query: String,
    navigator: N,
}

impl<N: Navigator> FilterEngine<N> {
    /// Seeds categories, perfume types and search from the navigator's query.
    ///
    /// Tokens the catalog does not offer are dropped and the cleaned query is written back.
    pub fn initialize(products: impl Into<Arc<[Product]>>, navigator: N) -> Self {
        let products = products.into();
        let facets = Facets::from_products(&products);

        let initial = query::parse(&navigator.read());
        let last_query = initial.to_query();
        let selection = initial.restrict(&facets);

        let mut state = FilterState::new(facets.max_price);
        state.categories = selection.categories;
        state.perfume_types = selection.perfume_types;
        state.search = selection.search;

        debug!(
            "Initialized filters over {} products, {} categories, {} perfume types, max price {}",
            products.len(),
            facets.categories.len(),
            facets.perfume_types.len(),
            facets.max_price
        );

        let mut engine = Self {
            products,
            facets,
            state,
            filtered: Vec::new(),
            query: last_query,
            navigator,
        };

        engine.refresh();
        engine
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.state.price_range = PriceRange::clamped(min, max, self.facets.max_price);
        self.refresh();
    }

    /// Unknown categories are ignored.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.facets.has_category(category) {
            debug!("Ignoring unknown category {category}");
            return;
        }

        if !self.state.categories.remove(category) {
            self.state.categories.insert(category.to_string());
        }

        self.refresh();
    }

    pub fn toggle_perfume_type(&mut self, perfume_type: &str) {
        if !self.facets.has_perfume_type(perfume_type) {
            debug!("Ignoring unknown perfume type {perfume_type}");
            return;
        }

        if !self.state.perfume_types.remove(perfume_type) {
            self.state.perfume_types.insert(perfume_type.to_string());
        }

        self.refresh();
    }

    /// Kept verbatim, trimmed only when matching and serializing.
    pub fn set_search_term(&mut self, term: &str) {
        self.state.search = term.to_string();
        self.refresh();
    }

    pub fn reset_filters(&mut self) {
        self.state = FilterState::new(self.facets.max_price);
        self.refresh();
    }

    /// Current listing, in catalog order.
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.filtered
            .iter()
            .map(|&index| &self.products[index])
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Canonical query string of the current state, without a leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    fn refresh(&mut self) {
        let needle = self.state.trimmed_search().to_lowercase();
        let needle = (!needle.is_empty()).then_some(needle.as_str());

        self.filtered = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| self.matches(product, needle))
            .map(|(index, _)| index)
            .collect();

        let query = query::serialize(&self.state);
        if query != self.query {
            trace!("Replacing query with {query:?}");
            self.navigator.replace(&query);
            self.query = query;
        }
    }

    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        let in_range = product
            .listing_price()
            .is_some_and(|price| self.state.price_range.contains(price));
        if !in_range {
            return false;
        }

        if !self.state.categories.is_empty()
            && !product
                .category()
                .is_some_and(|category| self.state.categories.contains(category))
        {
            return false;
        }

        if !self.state.perfume_types.is_empty()
            && !product
                .perfume_type()
                .is_some_and(|perfume_type| self.state.perfume_types.contains(perfume_type))
        {
            return false;
        }

        needle.is_none_or(|needle| {
            [
                &product.name,
                &product.description,
                &product.category,
                &product.perfume_type,
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
        })
    }
}
