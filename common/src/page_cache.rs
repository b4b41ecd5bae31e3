//! Pages already fetched, per filter signature.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::page_result::PageResult;
use crate::resource_kind::ResourceKind;
use crate::resource_query::{CacheKey, ResourceQuery};

/// Shared handle to the page store. Clones see the same entries.
///
/// There is no eviction: an entry lives as long as the last handle. Writes
/// replace an entry wholesale, they never merge into it.
#[derive(Debug)]
pub struct PageCache<T> {
    entries: Arc<RwLock<HashMap<CacheKey, Vec<PageResult<T>>>>>,
}

impl<T> Clone for PageCache<T> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone() }
    }
}

impl<T> Default for PageCache<T> {
    fn default() -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<T: Clone> PageCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind, query: &ResourceQuery) -> Vec<PageResult<T>> {
        self.get_key(&query.cache_key(kind))
    }

    pub fn set(&self, kind: ResourceKind, query: &ResourceQuery, pages: Vec<PageResult<T>>) {
        self.set_key(query.cache_key(kind), pages)
    }

    pub fn get_key(&self, key: &CacheKey) -> Vec<PageResult<T>> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned().unwrap_or_default()
    }

    pub fn set_key(&self, key: CacheKey, pages: Vec<PageResult<T>>) {
        debug!("page cache set {} {} filters={} pages={}", key.kind, key.first, key.filters, pages.len());
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key, pages);
    }

    pub fn contains(&self, kind: ResourceKind, query: &ResourceQuery) -> bool {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.contains_key(&query.cache_key(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_result::PageInfo;
    use crate::resource_query::FilterMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(items: &[&str], next: Option<&str>) -> PageResult<String> {
        PageResult {
            items: items.iter().map(|s| s.to_string()).collect(),
            page_info: PageInfo { has_next_page: next.is_some(), end_cursor: next.map(str::to_string) },
            ..PageResult::default()
        }
    }

    fn query(search: &str) -> ResourceQuery {
        let mut filters = FilterMap::new();
        filters.insert("search".into(), json!(search));
        ResourceQuery::new(12, filters)
    }

    #[test]
    fn missing_key_reads_empty() {
        let cache = PageCache::<String>::new();
        assert!(cache.get(ResourceKind::Blog, &query("roof")).is_empty());
        assert!(!cache.contains(ResourceKind::Blog, &query("roof")));
    }

    #[test]
    fn read_after_write_returns_what_was_written() {
        let cache = PageCache::new();
        let pages = vec![page(&["a", "b"], Some("c1")), page(&["c"], None)];
        cache.set(ResourceKind::Blog, &query("roof"), pages.clone());
        assert_eq!(cache.get(ResourceKind::Blog, &query("roof")), pages);
    }

    #[test]
    fn write_replaces_instead_of_merging() {
        let cache = PageCache::new();
        cache.set(ResourceKind::Blog, &query("roof"), vec![page(&["a"], Some("c1")), page(&["b"], None)]);
        cache.set(ResourceKind::Blog, &query("roof"), vec![page(&["z"], None)]);
        assert_eq!(cache.get(ResourceKind::Blog, &query("roof")), vec![page(&["z"], None)]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let cache = PageCache::new();
        let other = cache.clone();
        other.set(ResourceKind::Video, &query("tile"), vec![page(&["v"], None)]);
        assert_eq!(cache.get(ResourceKind::Video, &query("tile")).len(), 1);
        // the cursor of the query is not part of the key
        let later = query("tile").after_cursor(Some("c9".into()));
        assert!(cache.contains(ResourceKind::Video, &later));
    }
}
