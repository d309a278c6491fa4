//! Piece filter query
//!
//! Query string of `GET /pieces/filter`. The positions of the selected
//! category path map onto `categoryId` / `subcategoryId` / `genderId`;
//! anything beyond the path is omitted, never sent as an empty value.
//!
//! A terminal node can sit at any depth, so whether a qualifier was picked
//! is carried separately from the positional ids and never goes on the wire.

use serde::{Deserialize, Serialize};

/// Filter for `GET /pieces/filter`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// The path ends in a tapped terminal node
    #[serde(skip)]
    pub qualified: bool,
}

impl FilterQuery {
    /// Build a query from the ids of a category path (positions 0, 1, 2) and
    /// the free-text search. Blank search text is dropped.
    pub fn from_path<I, S>(ids: I, search: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = ids.into_iter().map(Into::into);
        let search = search.trim();
        Self {
            category_id: ids.next(),
            subcategory_id: ids.next(),
            gender_id: ids.next(),
            search: (!search.is_empty()).then(|| search.to_string()),
            qualified: false,
        }
    }

    /// Mark the last path id as the selected qualifier
    pub fn with_qualifier(mut self) -> Self {
        self.qualified = true;
        self
    }

    /// Search text, when present and non-blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A query is worth sending only with search text or a selected
    /// qualifier. Pure category browsing never hits the API.
    pub fn is_active(&self) -> bool {
        self.search_term().is_some() || self.qualified || self.gender_id.is_some()
    }

    /// `(key, value)` pairs in wire order, absent fields skipped
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("categoryId", self.category_id.as_deref()),
            ("subcategoryId", self.subcategory_id.as_deref()),
            ("genderId", self.gender_id.as_deref()),
            ("search", self.search_term()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}
