use common::archive_config::ArchiveConfig;
use dioxus::prelude::*;

use crate::data_definitions::url_query::ArchiveUrlQuery;
use crate::pages::archive_page::ArchivePage;

#[component]
pub fn ProjectPage(query: ArchiveUrlQuery) -> Element {
    rsx! {
        ArchivePage {
            config: ArchiveConfig::project(),
            query: query.0.clone(),
            heading: "Projects".to_string(),
            intro: "Completed work, filtered by building type, material and service.".to_string(),
        }
    }
}
