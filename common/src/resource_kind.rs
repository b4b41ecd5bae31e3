//! The collections that can be browsed through an archive.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Blog,
    Video,
    Project,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Blog, ResourceKind::Video, ResourceKind::Project];

    /// Path segment of the page endpoint for this kind, relative to the API base url.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blog",
            ResourceKind::Video => "videos",
            ResourceKind::Project => "projects",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blog",
            ResourceKind::Video => "video",
            ResourceKind::Project => "project",
        }
    }

    /// Plural noun used in result counts ("12 of 180 posts").
    pub fn noun_plural(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "posts",
            ResourceKind::Video => "videos",
            ResourceKind::Project => "projects",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
