use common::archive_config::ArchiveConfig;
use dioxus::prelude::*;

use crate::data_definitions::url_query::ArchiveUrlQuery;
use crate::pages::archive_page::ArchivePage;

#[component]
pub fn BlogPage(query: ArchiveUrlQuery) -> Element {
    rsx! {
        ArchivePage {
            config: ArchiveConfig::blog(),
            query: query.0.clone(),
            heading: "Blog".to_string(),
            intro: "News, guides and stories from our crews.".to_string(),
        }
    }
}
