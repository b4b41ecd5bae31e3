use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            // shown while the server-rendered first page is still on its way
            fallback: |_s: SuspenseContext| rsx! {
                div {
                    width: "100%",
                    min_height: "240px",
                    display: "flex",
                    align_items: "center",
                    justify_content: "center",
                    LoadingIndicator {}
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            class: "x-spinner",
            role: "status",
            aria_label: "Loading",
        }
    }
}
