//! Item shapes for each resource kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource_kind::ResourceKind;

/// Anything the incremental loader can list needs a natural key for list diffing.
pub trait NaturalKey {
    fn natural_key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl TermRef {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItem {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub categories: Vec<TermRef>,
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub categories: Vec<TermRef>,
}

impl VideoItem {
    /// Thumbnail to show, falling back to the YouTube still for the video id.
    pub fn thumbnail_url(&self) -> Option<String> {
        if let Some(thumbnail) = &self.thumbnail {
            return Some(thumbnail.url.clone());
        }
        self.youtube_id.as_ref().map(|id| format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub materials: Vec<TermRef>,
    #[serde(default)]
    pub service_areas: Vec<TermRef>,
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceItem {
    Post(PostItem),
    Video(VideoItem),
    Project(ProjectItem),
}

impl ResourceItem {
    /// Decodes one raw item of the given kind, `None` when it does not have the expected shape.
    pub fn decode(kind: ResourceKind, raw: Value) -> Option<Self> {
        let decoded = match kind {
            ResourceKind::Blog => serde_json::from_value(raw).map(ResourceItem::Post),
            ResourceKind::Video => serde_json::from_value(raw).map(ResourceItem::Video),
            ResourceKind::Project => serde_json::from_value(raw).map(ResourceItem::Project),
        };
        decoded.ok()
    }
}

impl NaturalKey for ResourceItem {
    fn natural_key(&self) -> &str {
        match self {
            ResourceItem::Post(post) => &post.slug,
            ResourceItem::Video(video) => &video.id,
            ResourceItem::Project(project) => &project.slug,
        }
    }
}

impl NaturalKey for String {
    fn natural_key(&self) -> &str {
        self
    }
}
