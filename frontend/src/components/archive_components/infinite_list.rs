//! The result grid, the scroll sentinel below it and the list footer.

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::components::archive_components::resource_archive::ArchiveContext;
use crate::components::archive_components::resource_cards::ResourceCard;
use crate::components::suspend_boundary::LoadingIndicator;
use crate::data_definitions::sentinel::{SentinelObserver, viewport_width_px};

#[component]
pub fn InfiniteList() -> Element {
    let archive = use_context::<ArchiveContext>();
    let items = archive.items;
    let view = archive.view;
    let loading_more = view.read().loading_more;
    let show_end_indicator = view.read().show_end_indicator;
    let has_more = view.read().has_more;
    // a new filter set gets a new sentinel, and with it a fresh observation
    let list_key = archive.driver.list_key();

    rsx! {
        ul {
            id: "x-archive-items",
            style: "
                list-style: none;
                margin: 0;
                padding: 0;
                display: grid;
                grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
                gap: 20px;
            ",
            for (key, item) in items.read().iter().cloned() {
                li {
                    key: "{key}",
                    ResourceCard { item }
                }
            }
        }
        if has_more {
            ScrollSentinel { key: "{list_key}" }
        }
        if loading_more {
            div {
                style: "display: flex; justify-content: center; padding: 16px;",
                LoadingIndicator {}
            }
        }
        if show_end_indicator {
            div {
                style: "text-align: center; padding: 24px; color: #6B7280; font-size: 14px;",
                "You've reached the end"
            }
        }
    }
}

/// Invisible marker after the last item. Its viewport visibility drives
/// loading of the next page.
#[component]
fn ScrollSentinel() -> Element {
    let archive = use_context::<ArchiveContext>();
    let driver = archive.driver;
    let mut observer = use_signal(|| None::<SentinelObserver>);
    // observer callbacks run outside the renderer, so they report through a channel
    let visibility = use_coroutine(move |mut rx: UnboundedReceiver<bool>| async move {
        while let Some(visible) = rx.next().await {
            driver.sentinel_changed(visible);
        }
    });

    rsx! {
        div {
            id: "x-archive-sentinel",
            aria_hidden: "true",
            style: "width: 100%; height: 1px;",
            onmounted: move |event: MountedEvent| {
                let Some(element) = event.data().downcast::<web_sys::Element>().cloned() else {
                    warn!("sentinel is not a DOM element, infinite scroll disabled");
                    return;
                };
                let config = driver.config();
                let width = viewport_width_px().unwrap_or(config.desktop_breakpoint_px);
                let margin = config.sentinel_margin_px(width);
                let tx = visibility.tx();
                match SentinelObserver::observe(&element, margin, move |visible| {
                    let _ = tx.unbounded_send(visible);
                }) {
                    Ok(created) => observer.set(Some(created)),
                    Err(e) => warn!("infinite scroll disabled: {e}"),
                }
            },
        }
    }
}
