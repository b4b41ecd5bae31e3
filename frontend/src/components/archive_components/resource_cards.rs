//! Cards for each resource kind.

use common::resource_item::{ImageRef, PostItem, ProjectItem, ResourceItem, TermRef, VideoItem};
use dioxus::prelude::*;

use crate::components::archive_components::resource_archive::ArchiveContext;

const CARD_STYLE: &str = "
    display: flex;
    flex-direction: column;
    height: 100%;
    border-radius: 14px;
    overflow: hidden;
    background: white;
    border: 1px solid #E5E7EB;
    box-shadow: 0 6px 16px rgba(0,0,0,0.06);
    color: #111827;
    text-decoration: none;
";

#[component]
pub fn ResourceCard(item: ResourceItem) -> Element {
    match item {
        ResourceItem::Post(post) => rsx! { PostCard { post } },
        ResourceItem::Video(video) => rsx! { VideoCard { video } },
        ResourceItem::Project(project) => rsx! { ProjectCard { project } },
    }
}

#[component]
fn PostCard(post: PostItem) -> Element {
    let href = post.uri.clone().unwrap_or_else(|| format!("/blog/{}", post.slug));
    let date = post.date.clone().unwrap_or_default();
    let excerpt = post.excerpt.clone().unwrap_or_default();
    rsx! {
        a {
            href: "{href}",
            style: CARD_STYLE,
            CardImage { image: post.featured_image.clone() }
            div {
                style: "display: flex; flex-direction: column; gap: 8px; padding: 16px;",
                TermList { terms: post.categories.clone() }
                h3 { style: "margin: 0; font-size: 18px;", "{post.title}" }
                if !date.is_empty() {
                    span { style: "font-size: 13px; color: #6B7280;", "{date}" }
                }
                if !excerpt.is_empty() {
                    p { style: "margin: 0; font-size: 14px; color: #374151;", "{excerpt}" }
                }
            }
        }
    }
}

#[component]
fn VideoCard(video: VideoItem) -> Element {
    let on_video_open = use_context::<ArchiveContext>().on_video_open;
    let thumbnail = video.thumbnail_url().unwrap_or_default();
    let alt = video.title.clone();
    let duration = video.duration.clone().unwrap_or_default();
    let opened = video.clone();

    rsx! {
        button {
            style: "{CARD_STYLE} padding: 0; text-align: left; cursor: pointer; font: inherit; width: 100%;",
            onclick: move |_| {
                if let Some(handler) = on_video_open {
                    handler.call(opened.clone());
                }
            },
            div {
                style: "position: relative; aspect-ratio: 16 / 9; background: #111827;",
                if !thumbnail.is_empty() {
                    img { src: "{thumbnail}", alt: "{alt}", loading: "lazy", style: "width: 100%; height: 100%; object-fit: cover;" }
                }
                if !duration.is_empty() {
                    span {
                        style: "position: absolute; right: 8px; bottom: 8px; padding: 2px 6px; border-radius: 4px; background: rgba(0,0,0,0.75); color: white; font-size: 12px;",
                        "{duration}"
                    }
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 8px; padding: 16px;",
                TermList { terms: video.categories.clone() }
                h3 { style: "margin: 0; font-size: 18px;", "{video.title}" }
            }
        }
    }
}

#[component]
fn ProjectCard(project: ProjectItem) -> Element {
    let href = project.uri.clone().unwrap_or_else(|| format!("/projects/{}", project.slug));
    let location = project.location.clone().unwrap_or_default();
    let mut terms = project.materials.clone();
    terms.extend(project.service_areas.iter().cloned());
    rsx! {
        a {
            href: "{href}",
            style: CARD_STYLE,
            CardImage { image: project.featured_image.clone() }
            div {
                style: "display: flex; flex-direction: column; gap: 8px; padding: 16px;",
                h3 { style: "margin: 0; font-size: 18px;", "{project.title}" }
                if !location.is_empty() {
                    span { style: "font-size: 13px; color: #6B7280;", "{location}" }
                }
                TermList { terms }
            }
        }
    }
}

#[component]
fn CardImage(#[props(!optional)] image: Option<ImageRef>) -> Element {
    let Some(image) = image else {
        return rsx! { div { style: "aspect-ratio: 16 / 9; background: #E5E7EB;" } };
    };
    let alt = image.alt.clone().unwrap_or_default();
    rsx! {
        img {
            src: "{image.url}",
            alt: "{alt}",
            loading: "lazy",
            style: "width: 100%; aspect-ratio: 16 / 9; object-fit: cover;",
        }
    }
}

#[component]
fn TermList(terms: Vec<TermRef>) -> Element {
    if terms.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 6px;",
            for term in terms.iter() {
                span {
                    key: "{term.slug}",
                    style: "padding: 2px 8px; border-radius: 9999px; background: #F3F4F6; color: #374151; font-size: 12px;",
                    "{term.label()}"
                }
            }
        }
    }
}
