//! Video archive, with a player overlay for the chosen video.

use common::archive_config::ArchiveConfig;
use common::resource_item::VideoItem;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_navigation_icons::MdClose;

use crate::data_definitions::url_query::ArchiveUrlQuery;
use crate::pages::archive_page::ArchivePage;

#[component]
pub fn VideoPage(query: ArchiveUrlQuery) -> Element {
    let mut playing = use_signal(|| None::<VideoItem>);

    let player = match playing() {
        Some(video) => rsx! {
            VideoPlayer { video, on_close: move |_| playing.set(None) }
        },
        None => rsx! {},
    };

    rsx! {
        ArchivePage {
            config: ArchiveConfig::video(),
            query: query.0.clone(),
            heading: "Videos".to_string(),
            intro: "Walkthroughs, how-tos and project footage.".to_string(),
            on_video_open: move |video| playing.set(Some(video)),
        }
        {player}
    }
}

#[component]
fn VideoPlayer(video: VideoItem, on_close: EventHandler<()>) -> Element {
    let title = video.title.clone();
    let media = match (&video.youtube_id, &video.video_url) {
        (Some(id), _) => rsx! {
            iframe {
                src: "https://www.youtube.com/embed/{id}?autoplay=1",
                title: "{title}",
                allow: "autoplay; encrypted-media; picture-in-picture",
                allowfullscreen: true,
                style: "width: 100%; aspect-ratio: 16 / 9; border: none;",
            }
        },
        (None, Some(url)) => rsx! {
            video {
                src: "{url}",
                controls: true,
                autoplay: true,
                style: "width: 100%; aspect-ratio: 16 / 9; background: black;",
            }
        },
        (None, None) => rsx! {
            p { style: "color: white; padding: 24px;", "This video is not available." }
        },
    };

    rsx! {
        div {
            role: "dialog",
            aria_modal: "true",
            aria_label: "{title}",
            tabindex: "-1",
            style: "
                position: fixed;
                inset: 0;
                z-index: 100;
                display: flex;
                align-items: center;
                justify-content: center;
                background: rgba(0,0,0,0.8);
                padding: 24px;
            ",
            onclick: move |_| on_close.call(()),
            onkeydown: move |e| {
                if e.key() == Key::Escape {
                    on_close.call(());
                }
            },

            div {
                style: "position: relative; width: 100%; max-width: 960px;",
                onclick: move |e| e.stop_propagation(),
                button {
                    aria_label: "Close video",
                    style: "position: absolute; top: -40px; right: 0; background: none; border: none; color: white; cursor: pointer;",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: MdClose, style: "width: 28px; height: 28px;" }
                }
                {media}
                h2 { style: "color: white; font-size: 20px; font-weight: 500; margin: 12px 0 0 0;", "{title}" }
            }
        }
    }
}
