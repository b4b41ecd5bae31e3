//! Error boundaries for rendering failures.
//!
//! Fetch failures never get here: archives keep them as inline state. These
//! boundaries catch configuration and rendering errors only.

use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                dioxus::logger::tracing::error!("render error in {boundary_name}: {err:?}");
                rsx! {
                    div {
                        style: "max-width: 720px; margin: 40px auto; padding: 24px; border: 1px solid #FCA5A5; border-radius: 12px; background: #FEF2F2;",
                        h1 {
                            style: "color: #991B1B; font-size: 32px; margin: 0 0 12px 0;",
                            "Something went wrong"
                        }
                        p {
                            style: "color: #7F1D1D; font-size: 16px;",
                            "This part of the site ({boundary_name}) could not be shown."
                        }
                        a {
                            href: "/",
                            style: "color: #1D4ED8; font-size: 16px;",
                            "Back to the home page"
                        }
                        pre {
                            style: "color: #450A0A; font-size: 12px; margin-top: 16px; text-wrap: auto; max-height: 300px; overflow-y: auto;",
                            "{err:#?}"
                        }
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        title: "This section failed to load".to_string(),
                        error_txt,
                        button {
                            style: "color: #1D4ED8; font-size: 16px; border: 1px solid #1D4ED8; background: white; padding: 8px 16px; border-radius: 9999px; cursor: pointer;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try again"
                        }
                    }
                }
            },
            {children}
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(title: ReadSignal<String>, error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            style: "
                width: 100%;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 12px;
                padding: 32px 16px;
                box-sizing: border-box;
            ",

            h2 {
                style: "color: #991B1B; font-size: 24px; margin: 0;",
                "{title}"
            }

            pre {
                style: "color: #7F1D1D; border: 1px solid #FCA5A5; padding: 10px; border-radius: 8px; margin: 0; text-wrap: auto; max-width: 560px; max-height: 300px; overflow-y: auto;",
                "{error_txt}"
            }

            {children}
        }
    }
}
