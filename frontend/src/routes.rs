use common::resource_kind::ResourceKind;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_query::ArchiveUrlQuery;
use crate::pages::blog_page::BlogPage;
use crate::pages::home_page::HomePage;
use crate::pages::project_page::ProjectPage;
use crate::pages::video_page::VideoPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/blog?:..query")]
    BlogPage { query: ArchiveUrlQuery },


    #[route("/videos?:..query")]
    VideoPage { query: ArchiveUrlQuery },


    #[route("/projects?:..query")]
    ProjectPage { query: ArchiveUrlQuery },

}

impl Route {
    /// The archive page of `kind` with an encoded query string (no leading `?`).
    pub fn archive(kind: ResourceKind, query: String) -> Self {
        let query = ArchiveUrlQuery::from(query);
        match kind {
            ResourceKind::Blog => Self::BlogPage { query },
            ResourceKind::Video => Self::VideoPage { query },
            ResourceKind::Project => Self::ProjectPage { query },
        }
    }
}
