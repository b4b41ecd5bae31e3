//! Infinite list state for one archive.
//!
//! The loader never performs I/O. It hands out [`LoaderCommand`]s (fetch a
//! page, abort a request) and is told how they ended. Each request carries an
//! id and only the result of the request currently in flight is applied, so a
//! late answer for a superseded filter set can never land in the list or the
//! cache.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::fetch_error::FetchError;
use crate::page_cache::PageCache;
use crate::page_result::{FacetGroup, PageResult};
use crate::resource_item::NaturalKey;
use crate::resource_kind::ResourceKind;
use crate::resource_query::{CacheKey, ResourceQuery};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub id: RequestId,
    pub key: CacheKey,
    pub query: ResourceQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderCommand {
    Fetch(PageRequest),
    Abort(RequestId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    first_page: bool,
}

/// An item with the key it should be rendered under.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedItem<'a, T> {
    pub key: String,
    pub index: usize,
    pub item: &'a T,
}

#[derive(Debug)]
pub struct IncrementalLoader<T> {
    kind: ResourceKind,
    cache: PageCache<T>,
    query: ResourceQuery,
    key: CacheKey,
    pages: Vec<PageResult<T>>,
    in_flight: Option<InFlight>,
    next_id: RequestId,
    sentinel_visible: bool,
    latched: bool,
    error: Option<FetchError>,
}

impl<T: Clone> IncrementalLoader<T> {
    /// Seeds from the cache for the query's key, else from the server-rendered
    /// `initial` page (written to the cache), else asks for the first page.
    pub fn new(
        kind: ResourceKind,
        query: ResourceQuery,
        initial: Option<PageResult<T>>,
        cache: PageCache<T>,
    ) -> (Self, Vec<LoaderCommand>) {
        let query = query.first_page();
        let key = query.cache_key(kind);
        let mut loader = Self {
            kind,
            cache,
            query,
            key,
            pages: Vec::new(),
            in_flight: None,
            next_id: 1,
            sentinel_visible: false,
            latched: false,
            error: None,
        };
        let mut commands = Vec::new();
        let cached = loader.cache.get_key(&loader.key);
        if !cached.is_empty() {
            loader.pages = cached;
        } else if let Some(initial) = initial {
            loader.pages = vec![initial];
            loader.cache.set_key(loader.key.clone(), loader.pages.clone());
        } else {
            commands.push(loader.issue(true));
        }
        (loader, commands)
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Switches to another filter signature. Does nothing when the key is unchanged.
    ///
    /// The sentinel is observed afresh for the new list, so its last known
    /// visibility is dropped along with the latch.
    pub fn set_query(&mut self, query: ResourceQuery) -> Vec<LoaderCommand> {
        let query = query.first_page();
        let key = query.cache_key(self.kind);
        if key == self.key {
            return Vec::new();
        }
        debug!("loader {} key change filters={}", self.kind, key.filters);
        let mut commands = Vec::new();
        if let Some(in_flight) = self.in_flight.take() {
            commands.push(LoaderCommand::Abort(in_flight.id));
        }
        self.query = query;
        self.key = key;
        self.error = None;
        self.latched = false;
        self.sentinel_visible = false;
        self.pages = self.cache.get_key(&self.key);
        if self.pages.is_empty() {
            commands.push(self.issue(true));
        }
        commands
    }

    /// Reports the sentinel entering (`true`) or leaving the viewport.
    ///
    /// Entering fetches the next page at most once; another fetch needs the
    /// sentinel to leave and come back.
    pub fn sentinel_changed(&mut self, visible: bool) -> Vec<LoaderCommand> {
        if !visible {
            self.sentinel_visible = false;
            self.latched = false;
            return Vec::new();
        }
        if self.sentinel_visible {
            return Vec::new();
        }
        self.sentinel_visible = true;
        self.load_more()
    }

    fn load_more(&mut self) -> Vec<LoaderCommand> {
        if self.latched || self.in_flight.is_some() || !self.has_more() {
            return Vec::new();
        }
        self.latched = true;
        vec![self.issue(false)]
    }

    fn issue(&mut self, first_page: bool) -> LoaderCommand {
        let id = self.next_id;
        self.next_id += 1;
        let query = if first_page {
            self.query.first_page()
        } else {
            let cursor = self.pages.last().and_then(|page| page.page_info.end_cursor.clone());
            self.query.after_cursor(cursor)
        };
        self.in_flight = Some(InFlight { id, first_page });
        self.error = None;
        debug!("loader {} request {id} after={:?}", self.kind, query.after);
        LoaderCommand::Fetch(PageRequest { id, key: self.key.clone(), query })
    }

    fn take_in_flight(&mut self, id: RequestId) -> Option<InFlight> {
        match self.in_flight {
            Some(in_flight) if in_flight.id == id => self.in_flight.take(),
            _ => {
                debug!("loader {} dropping stale result for request {id}", self.kind);
                None
            }
        }
    }

    /// Applies a page. Returns false when the request was no longer current.
    pub fn fetch_succeeded(&mut self, id: RequestId, page: PageResult<T>) -> bool {
        let Some(in_flight) = self.take_in_flight(id) else {
            return false;
        };
        if page.page_info.has_next_page && page.page_info.end_cursor.is_none() {
            warn!("loader {} request {id} reports a next page without a cursor, treating it as the last", self.kind);
        }
        if in_flight.first_page {
            self.pages = vec![page];
        } else {
            self.pages.push(page);
        }
        self.error = None;
        self.cache.set_key(self.key.clone(), self.pages.clone());
        true
    }

    /// Records a failure. Cancellations change nothing; other errors keep the loaded pages.
    pub fn fetch_failed(&mut self, id: RequestId, error: FetchError) -> bool {
        if self.take_in_flight(id).is_none() {
            return false;
        }
        if !error.is_cancelled() {
            self.error = Some(error);
        }
        true
    }

    /// Re-issues the request that failed.
    pub fn retry(&mut self) -> Vec<LoaderCommand> {
        if self.error.is_none() || self.in_flight.is_some() {
            return Vec::new();
        }
        let first_page = self.pages.is_empty();
        if !first_page && !self.has_more() {
            self.error = None;
            return Vec::new();
        }
        vec![self.issue(first_page)]
    }

    /// Aborts whatever is still in flight.
    pub fn unmount(&mut self) -> Vec<LoaderCommand> {
        self.in_flight.take().map(|in_flight| LoaderCommand::Abort(in_flight.id)).into_iter().collect()
    }

    pub fn pages(&self) -> &[PageResult<T>] {
        &self.pages
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.items.len()).sum()
    }

    /// A next page needs both the flag and a cursor to continue from.
    pub fn has_more(&self) -> bool {
        self.pages.last().is_some_and(|page| page.page_info.has_next_page && page.page_info.end_cursor.is_some())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_loading_first_page(&self) -> bool {
        self.in_flight.is_some_and(|in_flight| in_flight.first_page)
    }

    pub fn is_loading_more(&self) -> bool {
        self.in_flight.is_some_and(|in_flight| !in_flight.first_page)
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// True once the current key has its first page (or its first page failed).
    pub fn is_settled(&self) -> bool {
        !self.is_loading_first_page() && (!self.pages.is_empty() || self.error.is_some())
    }

    /// Filtered total: the last total any page of this key reported.
    pub fn total(&self) -> Option<u64> {
        self.pages.iter().rev().find_map(|page| page.total)
    }

    /// Facet buckets from the last page of this key that carried any.
    pub fn facets(&self) -> Option<&[FacetGroup]> {
        self.pages.iter().rev().find_map(|page| page.facets.as_deref())
    }

    /// The terminal "no more results" line: everything loaded and something to show.
    pub fn show_end_indicator(&self) -> bool {
        !self.pages.is_empty() && !self.has_more() && self.in_flight.is_none() && self.item_count() > 0
    }
}

impl<T: Clone + NaturalKey> IncrementalLoader<T> {
    /// Items with their list keys. A key already taken gets the item's position
    /// appended, repeatedly if that is taken too.
    pub fn keyed_items(&self) -> Vec<KeyedItem<'_, T>> {
        let mut taken = BTreeSet::<String>::new();
        self.items()
            .enumerate()
            .map(|(index, item)| {
                let natural = item.natural_key();
                let mut key = natural.to_string();
                while taken.contains(&key) {
                    key = format!("{key}@{index}");
                }
                taken.insert(key.clone());
                KeyedItem { key, index, item }
            })
            .collect()
    }
}
