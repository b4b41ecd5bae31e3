//! Top navigation bar component.

use common::resource_kind::ResourceKind;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::{MdBuild, MdDescription, MdHome};
use dioxus_free_icons::icons::md_image_icons::MdSlideshow;
use dioxus_free_icons::{Icon, IconShape};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

/// Shared navbar layout.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            style: "
                display: flex;
                flex-direction: column;
                width: 100%;
                min-height: 100vh;
            ",

            nav {
                id: "x-nav-topbar",
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 24px;
                    height: 64px;
                    padding: 0 24px;
                    background-color: #1C212D;
                    position: sticky;
                    top: 0;
                    z-index: 50;
                ",

                IconLink { to: Route::HomePage {}, icon: MdHome, label: "Home" }
                IconLink { to: Route::archive(ResourceKind::Blog, String::new()), icon: MdDescription, label: "Blog" }
                IconLink { to: Route::archive(ResourceKind::Video, String::new()), icon: MdSlideshow, label: "Videos" }
                IconLink { to: Route::archive(ResourceKind::Project, String::new()), icon: MdBuild, label: "Projects" }
            }

            div {
                id: "x-page-container",
                style: "flex-grow: 1; min-width: 100px;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static>(to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to: to,
            span {
                title: "{label}",
                style: "display: flex; align-items: center; gap: 8px; color: white; font-size: 15px;",
                Icon { icon: icon, style: "width: 22px; height: 22px;" }
                "{label}"
            }
        }
    }
}
