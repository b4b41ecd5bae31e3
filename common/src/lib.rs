//! Common library shared by the archive pages: resource models, the page
//! fetcher, and the filter and loader state machines.

extern crate serde;

pub mod resource_kind;
pub mod resource_item;
pub mod resource_query;
pub mod page_result;
pub mod page_cache;
pub mod fetch_error;
pub mod resource_fetcher;
pub mod request_tracker;
pub mod search_const;
pub mod archive_config;
pub mod selection;
pub mod search_text;
pub mod constraints;
pub mod facet_tabs;
pub mod url_state;
pub mod chips;
pub mod archive_filters;
pub mod incremental_loader;
pub mod archive_state;
