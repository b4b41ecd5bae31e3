use dioxus::prelude::*;

use crate::components::suspend_boundary::LoadingIndicator;

/// Covers the results while a new filter set loads.
#[component]
pub fn LoadingOverlay(visible: bool) -> Element {
    if !visible {
        return rsx! {};
    }
    rsx! {
        div {
            aria_busy: "true",
            style: "
                position: absolute;
                inset: 0;
                display: flex;
                align-items: flex-start;
                justify-content: center;
                padding-top: 80px;
                background-color: rgba(255, 255, 255, 0.7);
                z-index: 10;
            ",
            LoadingIndicator {}
        }
    }
}
