//! Facet groups as tabs, each holding a row of pills.

use common::archive_filters::FilterAction;
use common::facet_tabs::{FacetPill, FacetTab};
use dioxus::prelude::*;

use crate::components::archive_components::resource_archive::ArchiveContext;

#[component]
pub fn FacetTabStrip() -> Element {
    let archive = use_context::<ArchiveContext>();
    let view = archive.view;
    let tabs = view.read().tabs.clone();
    let mut expanded_tab = use_signal(|| tabs.first().map(|tab| tab.key.clone()).unwrap_or_default());

    if tabs.is_empty() {
        return rsx! {};
    }
    let active = tabs.iter().find(|tab| tab.key == *expanded_tab.read()).or(tabs.first()).cloned();
    let active_key = active.as_ref().map(|tab| tab.key.clone()).unwrap_or_default();
    let pill_row = active.map(|tab| rsx! { PillRow { key: "{active_key}", tab } });

    rsx! {
        div {
            id: "x-archive-facets",
            style: "display: flex; flex-direction: column; gap: 10px;",

            if tabs.len() > 1 {
                div {
                    role: "tablist",
                    style: "display: flex; flex-direction: row; gap: 8px; border-bottom: 1px solid #E5E7EB;",
                    for tab in tabs.iter().cloned() {
                        TabButton {
                            key: "{tab.key}",
                            selected: tab.key == active_key,
                            onselect: move |key: String| expanded_tab.set(key),
                            tab: tab.clone(),
                        }
                    }
                }
            }
            {pill_row}
        }
    }
}

#[component]
fn TabButton(tab: FacetTab, selected: bool, onselect: EventHandler<String>) -> Element {
    let selected_count = tab.selected_count();
    let key = tab.key.clone();
    let border = if selected { "2px solid #1D4ED8" } else { "2px solid transparent" };
    rsx! {
        button {
            role: "tab",
            aria_selected: "{selected}",
            style: "
                border: none;
                border-bottom: {border};
                background: none;
                padding: 8px 4px;
                font-size: 15px;
                font-weight: 500;
                cursor: pointer;
                color: #111827;
            ",
            onclick: move |_| onselect.call(key.clone()),
            "{tab.label}"
            if selected_count > 0 {
                span {
                    style: "margin-left: 6px; padding: 0 7px; border-radius: 9999px; background: #1D4ED8; color: white; font-size: 12px;",
                    "{selected_count}"
                }
            }
        }
    }
}

#[component]
fn PillRow(tab: FacetTab) -> Element {
    let archive = use_context::<ArchiveContext>();
    let driver = archive.driver;
    let group = tab.key.clone();
    let clear_group = tab.key.clone();
    let has_selection = tab.selected_count() > 0;

    rsx! {
        div {
            role: "tabpanel",
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 8px; align-items: center;",
            for pill in tab.pills.iter().cloned() {
                Pill { key: "{pill.slug}", group: group.clone(), pill: pill.clone() }
            }
            if has_selection {
                button {
                    style: "border: none; background: none; color: #1D4ED8; cursor: pointer; font-size: 14px;",
                    onclick: move |_| driver.dispatch(FilterAction::ClearGroup(clear_group.clone())),
                    "Clear {tab.label}"
                }
            }
        }
    }
}

#[component]
fn Pill(group: String, pill: FacetPill) -> Element {
    let driver = use_context::<ArchiveContext>().driver;
    let locked = driver.is_locked(&group, &pill.slug);
    let (background, color, border) = match (pill.selected, pill.disabled) {
        (true, _) => ("#1D4ED8", "white", "#1D4ED8"),
        (false, true) => ("#F3F4F6", "#9CA3AF", "#E5E7EB"),
        (false, false) => ("white", "#111827", "#D1D5DB"),
    };
    let cursor = if pill.disabled || locked { "default" } else { "pointer" };
    let title = if locked { "Required by another active filter" } else { "" };
    let slug = pill.slug.clone();

    rsx! {
        button {
            disabled: pill.disabled || locked,
            aria_pressed: "{pill.selected}",
            title: "{title}",
            style: "
                display: flex;
                align-items: center;
                gap: 6px;
                border-radius: 9999px;
                padding: 6px 12px;
                font-size: 14px;
                background: {background};
                color: {color};
                border: 1px solid {border};
                cursor: {cursor};
            ",
            onclick: move |_| {
                driver.dispatch(FilterAction::Toggle { group: group.clone(), slug: slug.clone() });
            },
            span { "{pill.label}" }
            span { style: "opacity: 0.75; font-size: 12px;", "{pill.count}" }
        }
    }
}
