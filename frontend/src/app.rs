use common::page_cache::PageCache;
use common::resource_item::ResourceItem;
use dioxus::prelude::*;

use crate::api::resource_api::client_fetcher;
use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    // pages already fetched survive navigation between archives
    use_context_provider(PageCache::<ResourceItem>::new);
    use_context_provider(client_fetcher);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        GlobalErrorBoundary {
            boundary_name: "App".to_string(),
            Router::<Route> {}
        }
    }
}
