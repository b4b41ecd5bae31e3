use common::archive_config::SearchDiscipline;
use common::archive_filters::FilterAction;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::icons::md_navigation_icons::MdClose;

use crate::components::archive_components::resource_archive::ArchiveContext;
use crate::data_definitions::clock::now_ms;

/// Search input. Depending on the archive it applies while typing (debounced)
/// or on Enter and the search button.
#[component]
pub fn SearchBox() -> Element {
    let archive = use_context::<ArchiveContext>();
    let driver = archive.driver;
    let view = archive.view;
    let config = driver.config();
    let submits = config.search_discipline == SearchDiscipline::Submit;
    let placeholder = format!("Search {}", config.kind.noun_plural());
    let search_button_color = use_memo(move || if view.read().search_dirty { "#1D4ED8" } else { "#6B7280" });

    let search_oninput = move |event: Event<FormData>| {
        driver.dispatch(FilterAction::SearchInput { text: event.value(), now_ms: now_ms() });
    };
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            event.prevent_default();
            driver.dispatch(FilterAction::SubmitSearch);
        }
    };
    let draft = view.read().search_draft.clone();

    rsx! {
        div {
            id: "x-archive-search-box",
            role: "search",
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                max-width: 560px;
                box-sizing: border-box;
            ",

            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                aria_label: "{placeholder}",
                style: "
                    flex: 1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 16px;
                ",
                value: "{draft}",
                oninput: search_oninput,
                onkeydown: search_onkeydown,
            }
            if !draft.is_empty() {
                button {
                    r#type: "button",
                    title: "Clear search",
                    style: "border: none; background: none; cursor: pointer; display: flex;",
                    onclick: move |_| driver.dispatch(FilterAction::ClearSearch),
                    Icon { icon: MdClose, style: "width: 18px; height: 18px; color: #6B7280;" }
                }
            }
            if submits {
                button {
                    r#type: "button",
                    style: "
                        border: none;
                        background: none;
                        cursor: pointer;
                        font-size: 15px;
                        font-weight: 500;
                        color: {search_button_color()};
                    ",
                    onclick: move |_| driver.dispatch(FilterAction::SubmitSearch),
                    "Search"
                }
            }
        }
    }
}
