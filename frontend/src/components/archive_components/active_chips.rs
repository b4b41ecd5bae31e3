use common::archive_filters::FilterAction;
use common::chips::ActiveChip;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_navigation_icons::MdClose;

use crate::components::archive_components::resource_archive::ArchiveContext;

/// One removable chip per active search or selection, plus "clear all".
#[component]
pub fn ActiveChips() -> Element {
    let archive = use_context::<ArchiveContext>();
    let driver = archive.driver;
    let chips = archive.view.read().chips.clone();
    if chips.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-archive-active-chips",
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 8px; align-items: center;",
            for chip in chips.iter().cloned() {
                Chip { key: "{chip.key()}", chip: chip.clone() }
            }
            button {
                style: "border: none; background: none; color: #1D4ED8; cursor: pointer; font-size: 14px;",
                onclick: move |_| driver.dispatch(FilterAction::ResetAll),
                "Clear all"
            }
        }
    }
}

#[component]
fn Chip(chip: ActiveChip) -> Element {
    let driver = use_context::<ArchiveContext>().driver;
    let action = chip.on_remove.clone();
    let description = match &chip.group_label {
        Some(group) => format!("{group}: {}", chip.label),
        None => format!("Search: {}", chip.label),
    };

    rsx! {
        span {
            style: "
                display: flex;
                align-items: center;
                gap: 4px;
                padding: 4px 6px 4px 12px;
                border-radius: 9999px;
                background: #EEF2FF;
                border: 1px solid #C7D2FE;
                color: #1E1B4B;
                font-size: 14px;
            ",
            "{description}"
            button {
                title: "Remove {description}",
                style: "border: none; background: none; cursor: pointer; display: flex; padding: 2px;",
                onclick: move |_| driver.dispatch(FilterAction::RemoveChip(action.clone())),
                Icon { icon: MdClose, style: "width: 16px; height: 16px; color: #4338CA;" }
            }
        }
    }
}
