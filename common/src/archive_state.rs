//! The archive orchestrator: filters, URL, loader, overlay and totals in one place.
//!
//! Hosts feed it events (user actions, URL changes, sentinel visibility, fetch
//! results, clock ticks) and execute the [`ArchiveEffects`] it returns. Time is
//! always passed in as milliseconds so the whole thing runs without timers.

use tracing::debug;

use crate::archive_config::ArchiveConfig;
use crate::archive_filters::{ArchiveFilters, FilterAction};
use crate::chips::ActiveChip;
use crate::facet_tabs::FacetTab;
use crate::fetch_error::FetchError;
use crate::incremental_loader::{IncrementalLoader, LoaderCommand, RequestId};
use crate::page_cache::PageCache;
use crate::page_result::{FacetGroup, PageResult};
use crate::url_state::{UrlState, UrlSync, decode_url_state, encode_url_state};

/// Keeps the loading overlay up for a minimum time once it appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingOverlay {
    min_ms: u64,
    started_ms: Option<u64>,
}

impl LoadingOverlay {
    pub fn new(min_ms: u64) -> Self {
        Self { min_ms, started_ms: None }
    }

    pub fn begin(&mut self, now_ms: u64) {
        self.started_ms = Some(now_ms);
    }

    pub fn is_visible(&self, now_ms: u64, pending: bool) -> bool {
        match self.started_ms {
            Some(started) => pending || now_ms < started.saturating_add(self.min_ms),
            None => false,
        }
    }

    /// When the overlay may disappear, if it is up.
    pub fn hide_at_ms(&self) -> Option<u64> {
        self.started_ms.map(|started| started.saturating_add(self.min_ms))
    }

    pub fn settle(&mut self, now_ms: u64, pending: bool) {
        if !self.is_visible(now_ms, pending) {
            self.started_ms = None;
        }
    }
}

/// What the host has to do after an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchiveEffects {
    pub commands: Vec<LoaderCommand>,
    /// Query string (without `?`) to write with history-replace.
    pub replace_url: Option<String>,
}

impl ArchiveEffects {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.replace_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyMessage {
    NoSearchMatches { term: String },
    NoFilterMatches,
    NothingPublished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: EmptyMessage,
    /// Offer the reset action; only when some filter is active.
    pub can_reset: bool,
}

impl EmptyState {
    pub fn title(&self) -> String {
        match &self.message {
            EmptyMessage::NoSearchMatches { term } => format!("No results for \u{201c}{term}\u{201d}"),
            EmptyMessage::NoFilterMatches => "Nothing matches these filters".to_string(),
            EmptyMessage::NothingPublished => "Nothing here yet".to_string(),
        }
    }

    pub fn hint(&self) -> &'static str {
        match &self.message {
            EmptyMessage::NoSearchMatches { .. } => "Check the spelling or try a broader term.",
            EmptyMessage::NoFilterMatches => "Try removing a filter to see more results.",
            EmptyMessage::NothingPublished => "Check back soon.",
        }
    }
}

/// Everything the archive renders apart from the items themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveView {
    pub tabs: Vec<FacetTab>,
    pub chips: Vec<ActiveChip>,
    pub search_draft: String,
    pub search_dirty: bool,
    pub any_filter_active: bool,
    pub visible_count: usize,
    pub filtered_total: Option<u64>,
    pub full_total: Option<u64>,
    pub overlay_visible: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
    pub has_more: bool,
    pub show_end_indicator: bool,
}

#[derive(Debug)]
pub struct ArchiveState<T> {
    config: ArchiveConfig,
    filters: ArchiveFilters,
    loader: IncrementalLoader<T>,
    url_sync: UrlSync,
    overlay: LoadingOverlay,
    full_total: Option<u64>,
    facets: Vec<FacetGroup>,
}

fn canonical_query(query: &str, config: &ArchiveConfig) -> String {
    encode_url_state(&decode_url_state(query, &config.facet_groups), &config.facet_groups)
}

impl<T: Clone> ArchiveState<T> {
    /// Builds the state from the URL (or `initial_filters` when the URL has none).
    ///
    /// `initial_result` is the server-rendered first page for `initial_filters`;
    /// it is used only when the mounted filters are those filters.
    pub fn mount(
        config: ArchiveConfig,
        initial_result: Option<PageResult<T>>,
        initial_filters: &UrlState,
        url_query: &str,
        cache: PageCache<T>,
        now_ms: u64,
    ) -> (Self, ArchiveEffects) {
        let filters = ArchiveFilters::from_url(&config, url_query, initial_filters);
        let query = filters.query(&config);
        let initial_query = ArchiveFilters::new(&config, initial_filters.clone()).query(&config);
        let initial_result = initial_result.filter(|_| initial_query.same_request(&query));
        let (loader, commands) = IncrementalLoader::new(config.kind, query, initial_result, cache);
        let mut state = Self {
            url_sync: UrlSync::new(canonical_query(url_query, &config)),
            overlay: LoadingOverlay::new(config.min_overlay_ms),
            config,
            filters,
            loader,
            full_total: None,
            facets: Vec::new(),
        };
        if state.loader.is_loading_first_page() {
            state.overlay.begin(now_ms);
        }
        state.observe_pages();
        let replace_url = state.url_sync.emit(state.filters.encoded_url(&state.config));
        (state, ArchiveEffects { commands, replace_url })
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn filters(&self) -> &ArchiveFilters {
        &self.filters
    }

    pub fn loader(&self) -> &IncrementalLoader<T> {
        &self.loader
    }

    pub fn full_total(&self) -> Option<u64> {
        self.full_total
    }

    /// Applies a user action and re-queries when the request filters changed.
    pub fn dispatch(&mut self, action: FilterAction, now_ms: u64) -> ArchiveEffects {
        let changed = self.filters.apply(&self.config, action);
        let mut effects = ArchiveEffects::default();
        if changed {
            effects.commands = self.requery(now_ms);
            effects.replace_url = self.url_sync.emit(self.filters.encoded_url(&self.config));
        }
        effects
    }

    /// Drives the debounce deadline and the overlay clock.
    pub fn tick(&mut self, now_ms: u64) -> ArchiveEffects {
        let effects = self.dispatch(FilterAction::Tick { now_ms }, now_ms);
        self.overlay.settle(now_ms, self.loader.is_loading_first_page());
        effects
    }

    /// An incoming URL (back/forward navigation, or the echo of our own replace).
    pub fn url_changed(&mut self, query: &str, now_ms: u64) -> ArchiveEffects {
        let canonical = canonical_query(query, &self.config);
        if !self.url_sync.accept_incoming(canonical) {
            return ArchiveEffects::default();
        }
        debug!("archive {} restoring from url {query:?}", self.config.kind);
        let state = decode_url_state(query, &self.config.facet_groups);
        let changed = self.filters.apply(&self.config, FilterAction::Restore(state));
        let mut effects = ArchiveEffects::default();
        if changed {
            effects.commands = self.requery(now_ms);
        }
        // constraint resolution may have changed what the URL should say
        effects.replace_url = self.url_sync.emit(self.filters.encoded_url(&self.config));
        effects
    }

    fn requery(&mut self, now_ms: u64) -> Vec<LoaderCommand> {
        let commands = self.loader.set_query(self.filters.query(&self.config));
        if self.loader.is_loading_first_page() {
            self.overlay.begin(now_ms);
        } else {
            self.observe_pages();
        }
        commands
    }

    pub fn sentinel_changed(&mut self, visible: bool) -> Vec<LoaderCommand> {
        self.loader.sentinel_changed(visible)
    }

    pub fn fetch_succeeded(&mut self, id: RequestId, page: PageResult<T>, now_ms: u64) -> bool {
        let applied = self.loader.fetch_succeeded(id, page);
        if applied {
            self.observe_pages();
        }
        self.overlay.settle(now_ms, self.loader.is_loading_first_page());
        applied
    }

    pub fn fetch_failed(&mut self, id: RequestId, error: FetchError, now_ms: u64) -> bool {
        let applied = self.loader.fetch_failed(id, error);
        self.overlay.settle(now_ms, self.loader.is_loading_first_page());
        applied
    }

    pub fn retry(&mut self, now_ms: u64) -> Vec<LoaderCommand> {
        let commands = self.loader.retry();
        if self.loader.is_loading_first_page() {
            self.overlay.begin(now_ms);
        }
        commands
    }

    pub fn unmount(&mut self) -> Vec<LoaderCommand> {
        self.loader.unmount()
    }

    fn observe_pages(&mut self) {
        let unfiltered = !self.filters.any_filter_active(&self.config);
        let mut best = self.full_total;
        for page in self.loader.pages() {
            let reported = [page.meta.full_total, page.meta.overall_total, page.total.filter(|_| unfiltered)];
            for total in reported.into_iter().flatten() {
                best = Some(best.map_or(total, |seen| seen.max(total)));
            }
        }
        self.full_total = best;
        if let Some(facets) = self.loader.facets() {
            self.facets = facets.to_vec();
        }
    }

    /// The next time `tick` has something to do.
    pub fn next_wakeup_ms(&self, now_ms: u64) -> Option<u64> {
        let overlay = self.overlay.hide_at_ms().filter(|at| *at > now_ms);
        [self.filters.search().deadline_ms(), overlay].into_iter().flatten().min()
    }

    fn empty_state(&self) -> Option<EmptyState> {
        let loader = &self.loader;
        if !loader.is_settled() || loader.error().is_some() || loader.item_count() > 0 {
            return None;
        }
        let any_filter_active = self.filters.any_filter_active(&self.config);
        let message = match self.filters.effective_search(&self.config) {
            Some(term) => EmptyMessage::NoSearchMatches { term: term.to_string() },
            None if any_filter_active => EmptyMessage::NoFilterMatches,
            None => EmptyMessage::NothingPublished,
        };
        Some(EmptyState { message, can_reset: any_filter_active })
    }

    pub fn view(&self, now_ms: u64) -> ArchiveView {
        let config = &self.config;
        let loader = &self.loader;
        ArchiveView {
            tabs: self.filters.tabs(config, &self.facets),
            chips: self.filters.chips(config),
            search_draft: self.filters.search().draft().to_string(),
            search_dirty: self.filters.search().is_dirty(),
            any_filter_active: self.filters.any_filter_active(config),
            visible_count: loader.item_count(),
            filtered_total: loader.total(),
            full_total: self.full_total,
            overlay_visible: self.overlay.is_visible(now_ms, loader.is_loading_first_page()),
            loading_more: loader.is_loading_more(),
            error: loader.error().map(FetchError::user_message),
            empty_state: self.empty_state(),
            has_more: loader.has_more(),
            show_end_indicator: loader.show_end_indicator(),
        }
    }
}
