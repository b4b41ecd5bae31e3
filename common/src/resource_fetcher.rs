//! The fetch boundary: one page, one round-trip, cancellable.

use std::future::Future;
use std::pin::pin;

use futures::future::{self, Either};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::fetch_error::{FetchError, FetchResult};
use crate::page_result::PageResult;
use crate::resource_item::ResourceItem;
use crate::resource_kind::ResourceKind;
use crate::resource_query::ResourceQuery;
use crate::search_const::{DEFAULT_RESOURCE_API_URL, RESOURCE_API_URL_ENV};

pub trait ResourceFetcher {
    type Item;

    /// Fetches one page. Resolves to [`FetchError::Cancelled`] once `cancel` fires,
    /// whether that happens before or while the request runs.
    fn fetch_page(
        &self,
        kind: ResourceKind,
        query: &ResourceQuery,
        cancel: &CancellationToken,
    ) -> impl Future<Output = FetchResult<PageResult<Self::Item>>>;
}

/// Longest part of an error body kept in [`FetchError::Server`], in characters.
const ERROR_EXCERPT_CHARS: usize = 200;

/// Start of an error body, cut on a character boundary.
fn error_excerpt(body: &str) -> String {
    body.chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// POSTs `{first, after, filters}` to `{base_url}/{kind endpoint}`.
#[derive(Debug, Clone)]
pub struct HttpResourceFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var(RESOURCE_API_URL_ENV).unwrap_or(DEFAULT_RESOURCE_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn endpoint_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), kind.endpoint())
    }

    async fn send(&self, kind: ResourceKind, query: &ResourceQuery) -> FetchResult<PageResult<ResourceItem>> {
        let url = self.endpoint_url(kind);
        debug!("fetch {kind} first={} after={:?}", query.first, query.after);
        let response = self.client.post(url).json(query).send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            let message = error_excerpt(&response_txt);
            return Err(FetchError::Server { status: status.as_u16(), message });
        }
        let body = serde_json::from_str::<Value>(&response_txt).unwrap_or_else(|e| {
            warn!("{kind} page response is not json ({e}), treating as empty");
            Value::Null
        });
        Ok(PageResult::from_value_lenient(body, |raw| ResourceItem::decode(kind, raw)))
    }
}

impl ResourceFetcher for HttpResourceFetcher {
    type Item = ResourceItem;

    async fn fetch_page(
        &self,
        kind: ResourceKind,
        query: &ResourceQuery,
        cancel: &CancellationToken,
    ) -> FetchResult<PageResult<ResourceItem>> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        let request = pin!(self.send(kind, query));
        let cancelled = pin!(cancel.cancelled());
        match future::select(request, cancelled).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                debug!("fetch {kind} after={:?} cancelled", query.after);
                Err(FetchError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_query::FilterMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_per_kind() {
        let fetcher = HttpResourceFetcher::new("https://example.com/api/");
        assert_eq!(fetcher.endpoint_url(ResourceKind::Blog), "https://example.com/api/blog");
        assert_eq!(fetcher.endpoint_url(ResourceKind::Video), "https://example.com/api/videos");
        assert_eq!(fetcher.endpoint_url(ResourceKind::Project), "https://example.com/api/projects");
    }

    #[test]
    fn error_excerpt_cuts_between_characters() {
        // the 200th byte falls inside the two-byte 'é'
        let body = format!("{}é{}", "a".repeat(199), "…".repeat(20));
        let excerpt = error_excerpt(&body);
        assert_eq!(excerpt.chars().count(), 200);
        assert!(excerpt.ends_with("aé"));
        assert_eq!(error_excerpt("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        // nothing listens on this port; a cancelled token must not even try
        let fetcher = HttpResourceFetcher::new("http://127.0.0.1:9");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = fetcher.fetch_page(ResourceKind::Blog, &ResourceQuery::new(12, FilterMap::new()), &cancel).await;
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
