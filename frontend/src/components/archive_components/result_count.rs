use dioxus::prelude::*;

use crate::components::archive_components::resource_archive::ArchiveContext;

/// "Showing 12 of 40 projects", and the inline fetch error with its retry.
#[component]
pub fn ResultCount() -> Element {
    let archive = use_context::<ArchiveContext>();
    let driver = archive.driver;
    let view = archive.view.read().clone();
    let noun = driver.kind().noun_plural();

    let summary = match view.filtered_total {
        Some(total) => format!("Showing {} of {total} {noun}", view.visible_count),
        None => format!("Showing {} {noun}", view.visible_count),
    };
    // the overall figure only adds information while filters narrow the list
    let overall = match (view.any_filter_active, view.full_total) {
        (true, Some(full)) => rsx! { span { style: "color: #6B7280;", "({full} in total)" } },
        _ => rsx! {},
    };
    let error = match view.error.clone() {
        Some(error) => rsx! {
            span {
                role: "alert",
                style: "color: #B91C1C;",
                "{error}"
            }
            button {
                style: "border: 1px solid #B91C1C; color: #B91C1C; background: white; border-radius: 9999px; padding: 2px 12px; cursor: pointer;",
                onclick: move |_| driver.retry(),
                "Retry"
            }
        },
        None => rsx! {},
    };

    rsx! {
        div {
            id: "x-archive-result-count",
            aria_live: "polite",
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 12px; align-items: center; font-size: 14px; color: #374151;",
            span { "{summary}" }
            {overall}
            {error}
        }
    }
}
