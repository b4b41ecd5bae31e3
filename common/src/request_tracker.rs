//! Cancellation tokens for requests that are still in flight.

use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::fetch_error::FetchError;
use crate::incremental_loader::{PageRequest, RequestId};
use crate::page_result::PageResult;
use crate::resource_fetcher::ResourceFetcher;

#[derive(Debug, Default)]
pub struct RequestTracker {
    in_flight: BTreeMap<RequestId, CancellationToken>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request and hands out the token its fetch must honor.
    pub fn start(&mut self, id: RequestId) -> CancellationToken {
        let token = CancellationToken::new();
        self.in_flight.insert(id, token.clone());
        token
    }

    pub fn abort(&mut self, id: RequestId) {
        if let Some(token) = self.in_flight.remove(&id) {
            debug!("abort request {id}");
            token.cancel();
        }
    }

    pub fn abort_all(&mut self) {
        for (id, token) in std::mem::take(&mut self.in_flight) {
            debug!("abort request {id}");
            token.cancel();
        }
    }

    /// Forgets a request that settled on its own.
    pub fn finish(&mut self, id: RequestId) {
        self.in_flight.remove(&id);
    }

    pub fn is_in_flight(&self, id: RequestId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(PageResult<T>),
    Cancelled,
    Failed(FetchError),
}

/// Runs one loader request and sorts the result into the three outcomes the
/// loader distinguishes.
pub async fn run_request<F: ResourceFetcher>(
    fetcher: &F,
    request: &PageRequest,
    cancel: &CancellationToken,
) -> FetchOutcome<F::Item> {
    match fetcher.fetch_page(request.key.kind, &request.query, cancel).await {
        Ok(page) => FetchOutcome::Loaded(page),
        Err(FetchError::Cancelled) => FetchOutcome::Cancelled,
        Err(_) if cancel.is_cancelled() => FetchOutcome::Cancelled,
        Err(e) => {
            warn!("request {} for {} failed: {e}", request.id, request.key.kind);
            FetchOutcome::Failed(e)
        }
    }
}
