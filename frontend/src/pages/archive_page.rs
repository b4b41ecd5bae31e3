//! Page frame shared by the three archives.

use common::archive_config::ArchiveConfig;
use common::resource_item::VideoItem;
use dioxus::prelude::*;

use crate::components::archive_components::resource_archive::ResourceArchive;
use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::suspend_boundary::SuspendWrapper;

#[component]
pub fn ArchivePage(
    config: ArchiveConfig,
    query: ReadSignal<String>,
    heading: String,
    intro: String,
    on_video_open: Option<EventHandler<VideoItem>>,
) -> Element {
    let mut listed = use_signal(|| 0_usize);
    let mut total = use_signal(|| None::<u64>);
    let noun = config.kind.noun_plural();

    let archive = match (config.validate(), on_video_open) {
        (Err(e), _) => rsx! {
            ComponentErrorDisplay {
                title: "This archive is misconfigured".to_string(),
                error_txt: e.to_string(),
            }
        },
        (Ok(()), Some(on_video_open)) => rsx! {
            SuspendWrapper {
                ResourceArchive {
                    config: config.clone(),
                    url_query: query,
                    on_visible_count_change: move |count| listed.set(count),
                    on_total_change: move |count| total.set(count),
                    on_video_open: on_video_open,
                }
            }
        },
        (Ok(()), None) => rsx! {
            SuspendWrapper {
                ResourceArchive {
                    config: config.clone(),
                    url_query: query,
                    on_visible_count_change: move |count| listed.set(count),
                    on_total_change: move |count| total.set(count),
                }
            }
        },
    };
    let badge = match total() {
        Some(total) => format!("{} of {total} {noun}", listed()),
        None => String::new(),
    };

    rsx! {
        Title { "{heading}" }
        div {
            id: "x-archive-page",
            style: "
                display: flex;
                flex-direction: column;
                gap: 24px;
                max-width: 1200px;
                margin: 0 auto;
                padding: 36px 24px;
                box-sizing: border-box;
            ",

            header {
                style: "display: flex; flex-direction: column; gap: 8px;",
                div {
                    style: "display: flex; align-items: baseline; gap: 16px; flex-wrap: wrap;",
                    h1 { style: "margin: 0; font-size: 40px; font-weight: 500; color: #0F172A;", "{heading}" }
                    span { style: "font-size: 15px; color: #6B7280;", "{badge}" }
                }
                p { style: "margin: 0; font-size: 18px; color: #374151; max-width: 720px;", "{intro}" }
            }

            {archive}
        }
    }
}
