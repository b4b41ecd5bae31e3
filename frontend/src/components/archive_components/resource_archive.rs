//! One archive on screen: an `ArchiveState` wired to the router, the network,
//! timers and the sentinel.
//!
//! Every event goes through [`ArchiveDriver`], which hands it to the state
//! machine and then carries out the returned effects: URL replacement, fetches,
//! aborts and the next timer tick.

use common::archive_config::ArchiveConfig;
use common::archive_filters::FilterAction;
use common::archive_state::{ArchiveEffects, ArchiveState, ArchiveView};
use common::fetch_error::FetchError;
use common::incremental_loader::{LoaderCommand, RequestId};
use common::page_cache::PageCache;
use common::request_tracker::{FetchOutcome, RequestTracker, run_request};
use common::resource_fetcher::HttpResourceFetcher;
use common::resource_item::{ResourceItem, VideoItem};
use common::resource_kind::ResourceKind;
use common::url_state::decode_url_state;
use dioxus::logger::tracing::{debug, warn};
use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::api::resource_api::fetch_initial_page;
use crate::components::archive_components::active_chips::ActiveChips;
use crate::components::archive_components::empty_state::EmptyStateNotice;
use crate::components::archive_components::facet_tabs::FacetTabStrip;
use crate::components::archive_components::infinite_list::InfiniteList;
use crate::components::archive_components::loading_overlay::LoadingOverlay;
use crate::components::archive_components::result_count::ResultCount;
use crate::components::archive_components::search_box::SearchBox;
use crate::data_definitions::clock::now_ms;
use crate::data_definitions::wakeup::WakeupSlot;
use crate::routes::Route;

#[derive(Clone, Copy)]
pub struct ArchiveDriver {
    archive: Signal<ArchiveState<ResourceItem>>,
    tracker: Signal<RequestTracker>,
    fetcher: Signal<HttpResourceFetcher>,
    wakeup: Signal<WakeupSlot<Task>>,
}

impl ArchiveDriver {
    pub fn kind(self) -> ResourceKind {
        self.archive.peek().config().kind
    }

    pub fn config(self) -> ArchiveConfig {
        self.archive.peek().config().clone()
    }

    pub fn dispatch(self, action: FilterAction) {
        let mut archive = self.archive;
        let effects = archive.write().dispatch(action, now_ms());
        self.apply(effects);
    }

    pub fn url_changed(self, query: &str) {
        let mut archive = self.archive;
        let effects = archive.write().url_changed(query, now_ms());
        self.apply(effects);
    }

    pub fn sentinel_changed(self, visible: bool) {
        let mut archive = self.archive;
        let commands = archive.write().sentinel_changed(visible);
        self.run(commands);
    }

    pub fn retry(self) {
        let mut archive = self.archive;
        let commands = archive.write().retry(now_ms());
        self.run(commands);
        self.schedule_tick();
    }

    /// Identifies the list currently shown (its filter signature).
    pub fn list_key(self) -> String {
        self.archive.read().loader().key().filters.clone()
    }

    /// True when the pill is held selected by a facet constraint.
    pub fn is_locked(self, group: &str, slug: &str) -> bool {
        let archive = self.archive.read();
        archive.filters().is_locked(archive.config(), group, slug)
    }

    fn apply(self, effects: ArchiveEffects) {
        if let Some(query) = effects.replace_url {
            navigator().replace(Route::archive(self.kind(), query));
        }
        self.run(effects.commands);
        self.schedule_tick();
    }

    fn run(self, commands: Vec<LoaderCommand>) {
        let mut tracker = self.tracker;
        for command in commands {
            match command {
                LoaderCommand::Abort(id) => tracker.write().abort(id),
                LoaderCommand::Fetch(request) => {
                    let cancel = tracker.write().start(request.id);
                    let fetcher = self.fetcher.peek().clone();
                    spawn(async move {
                        let outcome = run_request(&fetcher, &request, &cancel).await;
                        self.settle(request.id, outcome);
                    });
                }
            }
        }
    }

    fn settle(self, id: RequestId, outcome: FetchOutcome<ResourceItem>) {
        let mut archive = self.archive;
        let mut tracker = self.tracker;
        tracker.write().finish(id);
        let now = now_ms();
        let applied = match outcome {
            FetchOutcome::Loaded(page) => archive.write().fetch_succeeded(id, page, now),
            FetchOutcome::Cancelled => archive.write().fetch_failed(id, FetchError::Cancelled, now),
            FetchOutcome::Failed(error) => archive.write().fetch_failed(id, error, now),
        };
        if !applied {
            debug!("request {id} settled after it was superseded");
        }
        self.schedule_tick();
    }

    /// Wakes the state machine when its debounce or overlay deadline passes.
    /// Only the earliest deadline has a timer; arming for a new one cancels the old.
    fn schedule_tick(self) {
        let now = now_ms();
        let Some(at) = self.archive.peek().next_wakeup_ms(now) else {
            return;
        };
        let delay = at.saturating_sub(now).min(u32::MAX as u64) as u32;
        let mut wakeup = self.wakeup;
        let replaced = wakeup.write().arm(at, || {
            spawn(async move {
                TimeoutFuture::new(delay).await;
                let mut wakeup = self.wakeup;
                wakeup.write().fired(at);
                let mut archive = self.archive;
                let effects = archive.write().tick(now_ms());
                self.apply(effects);
            })
        });
        if let Some(task) = replaced {
            task.cancel();
        }
    }

    fn unmount(self) {
        let mut archive = self.archive;
        let mut tracker = self.tracker;
        if let Ok(mut archive) = archive.try_write() {
            let aborted = archive.unmount();
            debug!("archive unmounted, {} request(s) aborted", aborted.len());
        }
        if let Ok(mut tracker) = tracker.try_write() {
            tracker.abort_all();
        }
        let mut wakeup = self.wakeup;
        if let Some(task) = wakeup.try_write().ok().and_then(|mut slot| slot.take()) {
            task.cancel();
        }
    }
}

/// What the archive's child components read and call.
#[derive(Clone, Copy)]
pub struct ArchiveContext {
    pub driver: ArchiveDriver,
    pub view: Memo<ArchiveView>,
    pub items: Memo<Vec<(String, ResourceItem)>>,
    pub on_video_open: Option<EventHandler<VideoItem>>,
}

/// A searchable, filterable, infinitely scrolling archive of one resource kind.
///
/// The first page for the URL's filters is rendered on the server; after that
/// the archive fetches from the browser. The observer callbacks fire when the
/// number of listed items or the filtered total change, and when a video card
/// is opened.
#[component]
pub fn ResourceArchive(
    config: ArchiveConfig,
    url_query: ReadSignal<String>,
    on_visible_count_change: Option<EventHandler<usize>>,
    on_total_change: Option<EventHandler<Option<u64>>>,
    on_video_open: Option<EventHandler<VideoItem>>,
) -> Element {
    let kind = config.kind;
    // the URL is read once here; later changes arrive through `url_changed`
    let initial_page = use_server_future(move || fetch_initial_page(kind, url_query.peek().clone()))?;

    let cache = use_context::<PageCache<ResourceItem>>();
    let fetcher = use_context::<HttpResourceFetcher>();
    let (driver, mount_effects) = use_hook(move || {
        let initial_result = match &*initial_page.peek() {
            Some(Ok(page)) => Some(page.clone()),
            Some(Err(e)) => {
                warn!("server-rendered {kind} page unavailable, loading in the browser: {e}");
                None
            }
            None => None,
        };
        let url = url_query.peek().clone();
        let initial_filters = decode_url_state(&url, &config.facet_groups);
        let (state, effects) = ArchiveState::mount(config, initial_result, &initial_filters, &url, cache, now_ms());
        let driver = ArchiveDriver {
            archive: Signal::new(state),
            tracker: Signal::new(RequestTracker::new()),
            fetcher: Signal::new(fetcher),
            wakeup: Signal::new(WakeupSlot::default()),
        };
        (driver, effects)
    });

    let view = use_memo(move || driver.archive.read().view(now_ms()));
    let items = use_memo(move || {
        let archive = driver.archive.read();
        archive.loader().keyed_items().into_iter().map(|keyed| (keyed.key, keyed.item.clone())).collect::<Vec<_>>()
    });
    use_context_provider(move || ArchiveContext { driver, view, items, on_video_open });

    use_effect(move || driver.apply(mount_effects.clone()));
    // back/forward navigation, and the router echoing our own replacements
    use_effect(move || {
        let query = url_query.read().clone();
        driver.url_changed(&query);
    });
    use_drop(move || driver.unmount());

    let visible_count = use_memo(move || view.read().visible_count);
    use_effect(move || {
        let count = visible_count();
        if let Some(handler) = on_visible_count_change {
            handler.call(count);
        }
    });
    let filtered_total = use_memo(move || view.read().filtered_total);
    use_effect(move || {
        let total = filtered_total();
        if let Some(handler) = on_total_change {
            handler.call(total);
        }
    });

    let body = match view.read().empty_state.clone() {
        Some(empty) => rsx! { EmptyStateNotice { empty } },
        None => rsx! { InfiniteList {} },
    };
    let overlay_visible = view.read().overlay_visible;

    rsx! {
        div {
            id: "x-archive-{kind}",
            style: "
                display: flex;
                flex-direction: column;
                gap: 16px;
                width: 100%;
            ",

            div {
                id: "x-archive-controls",
                style: "
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                ",
                SearchBox {}
                FacetTabStrip {}
                ActiveChips {}
                ResultCount {}
            }

            div {
                id: "x-archive-results",
                style: "position: relative; min-height: 240px;",
                {body}
                LoadingOverlay { visible: overlay_visible }
            }
        }
    }
}
