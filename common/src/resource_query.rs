//! The query sent to a page endpoint, and the key it is cached under.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resource_kind::ResourceKind;

/// Filter name to filter value. Sorted, so the serialized form is stable.
pub type FilterMap = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuery {
    pub first: u32,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub filters: FilterMap,
}

impl ResourceQuery {
    pub fn new(first: u32, filters: FilterMap) -> Self {
        Self { first, after: None, filters }
    }

    /// Same request, continued after `cursor`.
    pub fn after_cursor(&self, cursor: Option<String>) -> Self {
        Self { first: self.first, after: cursor, filters: self.filters.clone() }
    }

    /// Same request, from the first page.
    pub fn first_page(&self) -> Self {
        self.after_cursor(None)
    }

    pub fn serialized_filters(&self) -> String {
        // a map of strings to json values always serializes
        serde_json::to_string(&self.filters).unwrap_or_default()
    }

    pub fn same_request(&self, other: &ResourceQuery) -> bool {
        self.first == other.first && self.serialized_filters() == other.serialized_filters()
    }

    pub fn cache_key(&self, kind: ResourceKind) -> CacheKey {
        CacheKey { kind, first: self.first, filters: self.serialized_filters() }
    }
}

/// Identifies one filter signature of one collection. `after` is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub first: u32,
    pub filters: String,
}
