use common::archive_config::ArchiveConfig;
use common::resource_kind::ResourceKind;
use common::url_state::{UrlState, encode_url_state};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;

use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Resource Archive - Home" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            div {
                style: "color: #0F172A; font-size: 46px; font-weight: 500; letter-spacing: -0.02em;",
                "Resources"
            }
            div {
                style: "color: #111827; font-size: 24px; line-height: 1.6; max-width: 620px; font-weight: 500;",
                "Browse our articles, videos and finished projects. Search by keyword, then narrow down with filters."
            }

            div {
                style: "
                    display:flex;
                    flex-direction: row;
                    gap: 20px;
                    flex-wrap: wrap;
                    align-items: stretch;
                    margin-top: 10px;
                ",
                ArchiveCard {
                    kind: ResourceKind::Blog,
                    title: "Blog",
                    description: "Guides, news and advice, sorted newest first.",
                    background: "linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%)",
                    BlogSearchInput {}
                }
                ArchiveCard {
                    kind: ResourceKind::Video,
                    title: "Videos",
                    description: "How-tos and walkthroughs. Filter by topic or by the material shown.",
                    background: "linear-gradient(135deg, #0B7A2B 0%, #23A340 60%, #178E35 100%)",
                }
                ArchiveCard {
                    kind: ResourceKind::Project,
                    title: "Projects",
                    description: "Finished work by building type, material and service.",
                    background: "linear-gradient(135deg, #9A3412 0%, #EA580C 100%)",
                }
            }
        }
    }
}

#[component]
fn ArchiveCard(kind: ResourceKind, title: String, description: String, background: String, children: Element) -> Element {
    rsx! {
        div {
            id: "x-card-{kind}",
            style: "
                display:flex;
                flex-direction: column;
                gap: 14px;
                width: 360px;
                min-height: 240px;
                border-radius: 22px;
                padding: 22px 22px 26px 22px;
                background: {background};
                color: white;
                box-shadow: 0 8px 24px rgba(0,0,0,0.12);
            ",

            div { style: "font-size: 30px; font-weight: 500;", "{title}" }
            div {
                style: "font-size: 18px; font-weight: 500; line-height: 1.5; color: rgba(255,255,255,0.92); flex-grow: 1;",
                "{description}"
            }
            {children}
            Link {
                to: Route::archive(kind, String::new()),
                style: "color: white; font-size: 16px; text-decoration: underline;",
                "Browse all {kind.noun_plural()}"
            }
        }
    }
}

#[component]
fn BlogSearchInput() -> Element {
    let nav = navigator();
    let mut search_q = use_signal(String::new);
    rsx! {
        div {
            style: "
                display:flex;
                align-items:center;
                gap: 10px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 42px;
                color: #111827;
            ",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
            input {
                r#type: "search",
                placeholder: "Search the blog",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 14px;
                ",
                oninput: move |e| {
                    *search_q.write() = e.value();
                },
                onkeypress: move |e| {
                    if e.key() == Key::Enter {
                        e.prevent_default();
                        let state = UrlState { search: Some(search_q.read().clone()), ..Default::default() };
                        let query = encode_url_state(&state, &ArchiveConfig::blog().facet_groups);
                        nav.push(Route::archive(ResourceKind::Blog, query));
                    }
                },
            }
        }
    }
}
