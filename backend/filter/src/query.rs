//! # Query String
//!
//! Shareable form of a filter selection.
//!
//! ## Keys
//! - `category`: comma separated categories
//! - `perfume_type`: comma separated perfume types
//! - `search`: trimmed search term
//!
//! Keys are written in that order and left out when empty. The price range is never written.
//! Unknown keys are ignored on read, a repeated key keeps its first value.
//!
//! A value containing `,` splits into two tokens on read, so such a category or perfume type can
//! be written but never selected again. Catalog labels are kept free of commas instead: the
//! dashboard forms reject them and the `process` tool rewrites them.
use std::collections::BTreeSet;

use url::form_urlencoded::{self, Serializer};

use crate::{facets::Facets, state::FilterState};

pub const CATEGORY_KEY: &str = "category";
pub const PERFUME_TYPE_KEY: &str = "perfume_type";
pub const SEARCH_KEY: &str = "search";

const SEPARATOR: &str = ",";

/// Selection read from a query string, not yet checked against a catalog.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Selection {
    pub categories: BTreeSet<String>,
    pub perfume_types: BTreeSet<String>,
    pub search: String,
}

impl Selection {
    /// Drops every token the catalog does not offer.
    pub fn restrict(mut self, facets: &Facets) -> Self {
        self.categories.retain(|category| facets.has_category(category));
        self.perfume_types
            .retain(|perfume_type| facets.has_perfume_type(perfume_type));
        self
    }

    pub fn to_query(&self) -> String {
        encode(&self.categories, &self.perfume_types, self.search.trim())
    }
}

pub fn serialize(state: &FilterState) -> String {
    encode(
        &state.categories,
        &state.perfume_types,
        state.trimmed_search(),
    )
}

/// Replaces the filter keys of `current` with `filters`, keeping every other pair.
pub fn merge_foreign(current: &str, filters: &str) -> String {
    let current = current.strip_prefix('?').unwrap_or(current);
    let mut serializer = Serializer::for_suffix(filters.to_string(), 0);

    for (key, value) in form_urlencoded::parse(current.as_bytes()) {
        if !is_filter_key(&key) {
            serializer.append_pair(&key, &value);
        }
    }

    serializer.finish()
}

fn is_filter_key(key: &str) -> bool {
    matches!(key, CATEGORY_KEY | PERFUME_TYPE_KEY | SEARCH_KEY)
}

fn encode(categories: &BTreeSet<String>, perfume_types: &BTreeSet<String>, search: &str) -> String {
    let mut serializer = Serializer::new(String::new());

    if !categories.is_empty() {
        serializer.append_pair(CATEGORY_KEY, &join(categories));
    }

    if !perfume_types.is_empty() {
        serializer.append_pair(PERFUME_TYPE_KEY, &join(perfume_types));
    }

    if !search.is_empty() {
        serializer.append_pair(SEARCH_KEY, search);
    }

    serializer.finish()
}

pub fn parse(query: &str) -> Selection {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut categories = None;
    let mut perfume_types = None;
    let mut search = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            CATEGORY_KEY => &mut categories,
            PERFUME_TYPE_KEY => &mut perfume_types,
            SEARCH_KEY => &mut search,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    Selection {
        categories: split(categories.as_deref()),
        perfume_types: split(perfume_types.as_deref()),
        search: search.unwrap_or_default(),
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn split(value: Option<&str>) -> BTreeSet<String> {
    value
        .into_iter()
        .flat_map(|value| value.split(SEPARATOR))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
