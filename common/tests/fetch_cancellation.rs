use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use common::archive_config::ArchiveConfig;
use common::archive_filters::FilterAction;
use common::archive_state::ArchiveState;
use common::fetch_error::{FetchError, FetchResult};
use common::incremental_loader::{LoaderCommand, PageRequest};
use common::page_cache::PageCache;
use common::page_result::PageResult;
use common::request_tracker::{FetchOutcome, RequestTracker, run_request};
use common::resource_fetcher::ResourceFetcher;
use common::resource_kind::ResourceKind;
use common::resource_query::ResourceQuery;
use common::url_state::UrlState;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// Answers from a script, but only once the gate lets a response through.
#[derive(Default)]
struct GatedFetcher {
    gate: Arc<Notify>,
    script: Mutex<VecDeque<FetchResult<PageResult<String>>>>,
    seen: Mutex<Vec<ResourceQuery>>,
}

impl GatedFetcher {
    fn scripted(responses: impl IntoIterator<Item = FetchResult<PageResult<String>>>) -> Self {
        Self { script: Mutex::new(responses.into_iter().collect()), ..Self::default() }
    }
}

impl ResourceFetcher for GatedFetcher {
    type Item = String;

    async fn fetch_page(
        &self,
        _kind: ResourceKind,
        query: &ResourceQuery,
        cancel: &CancellationToken,
    ) -> FetchResult<PageResult<String>> {
        self.seen.lock().unwrap().push(query.clone());
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            _ = self.gate.notified() => {
                self.script.lock().unwrap().pop_front().unwrap_or_else(|| Ok(PageResult::default()))
            }
        }
    }
}

fn page(items: &[&str]) -> PageResult<String> {
    PageResult { items: items.iter().map(|s| s.to_string()).collect(), total: Some(items.len() as u64), ..PageResult::default() }
}

fn split(commands: Vec<LoaderCommand>, tracker: &mut RequestTracker) -> Vec<(PageRequest, CancellationToken)> {
    let mut started = Vec::new();
    for command in commands {
        match command {
            LoaderCommand::Abort(id) => tracker.abort(id),
            LoaderCommand::Fetch(request) => {
                let token = tracker.start(request.id);
                started.push((request, token));
            }
        }
    }
    started
}

#[tokio::test]
async fn aborting_an_in_flight_request_resolves_it_as_cancelled() {
    let fetcher = GatedFetcher::scripted([Ok(page(&["metal-1"]))]);
    let mut tracker = RequestTracker::new();
    let (mut state, effects) =
        ArchiveState::<String>::mount(ArchiveConfig::project(), None, &UrlState::default(), "", PageCache::new(), 0);
    let (first, first_token) = split(effects.commands, &mut tracker).remove(0);

    let toggle = FilterAction::Toggle { group: "mt".into(), slug: "metal".into() };
    let (outcome, started) = tokio::join!(run_request(&fetcher, &first, &first_token), async {
        tokio::task::yield_now().await;
        split(state.dispatch(toggle, 10).commands, &mut tracker)
    });
    assert_eq!(outcome, FetchOutcome::Cancelled);
    assert!(first_token.is_cancelled());
    assert!(!state.fetch_failed(first.id, FetchError::Cancelled, 20));

    let (second, second_token) = started.into_iter().next().unwrap();
    fetcher.gate.notify_one();
    let FetchOutcome::Loaded(loaded) = run_request(&fetcher, &second, &second_token).await else {
        panic!("second request should load");
    };
    tracker.finish(second.id);
    assert!(state.fetch_succeeded(second.id, loaded, 30));
    assert_eq!(state.loader().items().cloned().collect::<Vec<_>>(), vec!["metal-1".to_string()]);
    assert!(tracker.is_empty());
    assert_eq!(fetcher.seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn server_errors_surface_and_retry_recovers() {
    let fetcher = GatedFetcher::scripted([
        Err(FetchError::Server { status: 503, message: "maintenance".into() }),
        Ok(page(&["p1"])),
    ]);
    let mut tracker = RequestTracker::new();
    let (mut state, effects) =
        ArchiveState::<String>::mount(ArchiveConfig::blog(), None, &UrlState::default(), "", PageCache::new(), 0);
    let (request, token) = split(effects.commands, &mut tracker).remove(0);

    fetcher.gate.notify_one();
    let FetchOutcome::Failed(error) = run_request(&fetcher, &request, &token).await else {
        panic!("expected a failure");
    };
    tracker.finish(request.id);
    assert!(error.is_retryable());
    state.fetch_failed(request.id, error, 100);
    let view = state.view(1_000);
    assert!(view.error.is_some());
    assert_eq!(view.empty_state, None);

    let (retry, token) = split(state.retry(1_000), &mut tracker).remove(0);
    fetcher.gate.notify_one();
    let FetchOutcome::Loaded(loaded) = run_request(&fetcher, &retry, &token).await else {
        panic!("retry should load");
    };
    assert!(state.fetch_succeeded(retry.id, loaded, 1_100));
    assert_eq!(state.view(2_000).error, None);
    assert_eq!(state.view(2_000).visible_count, 1);
}

#[tokio::test]
async fn a_cancelled_token_wins_over_a_ready_response() {
    let fetcher = GatedFetcher::scripted([Ok(page(&["x"]))]);
    let request = PageRequest {
        id: 1,
        key: ResourceQuery::new(12, Default::default()).cache_key(ResourceKind::Video),
        query: ResourceQuery::new(12, Default::default()),
    };
    let token = CancellationToken::new();
    fetcher.gate.notify_one();
    token.cancel();
    assert_eq!(run_request(&fetcher, &request, &token).await, FetchOutcome::Cancelled);
}
