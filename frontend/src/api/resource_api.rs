//! Client and server access to the content layer's page endpoints.

use common::page_result::PageResult;
use common::resource_fetcher::HttpResourceFetcher;
use common::resource_item::ResourceItem;
use common::resource_kind::ResourceKind;
use dioxus::prelude::*;

/// Path under the site origin that proxies the content layer.
pub const API_PATH: &str = "/api";

/// Fetcher used by archives running in the browser.
///
/// In the browser the endpoints live under the page origin; anywhere else the
/// base URL comes from the environment.
pub fn client_fetcher() -> HttpResourceFetcher {
    #[cfg(target_arch = "wasm32")]
    if let Some(origin) = web_sys::window().and_then(|window| window.location().origin().ok()) {
        return HttpResourceFetcher::new(format!("{origin}{API_PATH}"));
    }
    HttpResourceFetcher::from_env()
}

/// First page of an archive for the filters in `url_query`, rendered on the server.
#[server]
pub async fn fetch_initial_page(kind: ResourceKind, url_query: String) -> Result<PageResult<ResourceItem>, ServerFnError> {
    use common::archive_config::ArchiveConfig;
    use common::archive_filters::ArchiveFilters;
    use common::resource_fetcher::ResourceFetcher;
    use common::url_state::UrlState;
    use tokio_util::sync::CancellationToken;

    let config = ArchiveConfig::for_kind(kind);
    let filters = ArchiveFilters::from_url(&config, &url_query, &UrlState::default());
    let fetcher = HttpResourceFetcher::from_env();
    let page = fetcher.fetch_page(kind, &filters.query(&config), &CancellationToken::new()).await;
    page.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 502, details: None })
}
