use common::archive_filters::FilterAction;
use common::archive_state::EmptyState;
use dioxus::prelude::*;

use crate::components::archive_components::resource_archive::ArchiveContext;

#[component]
pub fn EmptyStateNotice(empty: EmptyState) -> Element {
    let driver = use_context::<ArchiveContext>().driver;
    rsx! {
        div {
            id: "x-archive-empty-state",
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 10px;
                padding: 48px 16px;
                text-align: center;
                color: #374151;
            ",
            h2 { style: "margin: 0; font-size: 22px; color: #111827;", "{empty.title()}" }
            p { style: "margin: 0; font-size: 15px;", "{empty.hint()}" }
            if empty.can_reset {
                button {
                    style: "
                        margin-top: 8px;
                        padding: 8px 18px;
                        border-radius: 9999px;
                        border: 1px solid #1D4ED8;
                        background: #1D4ED8;
                        color: white;
                        cursor: pointer;
                        font-size: 15px;
                    ",
                    onclick: move |_| driver.dispatch(FilterAction::ResetAll),
                    "Reset filters"
                }
            }
        }
    }
}
