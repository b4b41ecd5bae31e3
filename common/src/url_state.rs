//! Archive state in the URL query string.
//!
//! `q` carries the search text and every facet group gets one parameter named
//! after its key, holding a comma-joined slug list: `?q=gutter&mt=metal,tile`.
//! Decoding never fails; anything it does not understand is treated as absent.

use url::form_urlencoded;

use crate::archive_config::FacetGroupConfig;
use crate::search_const::SEARCH_URL_PARAM;
use crate::selection::{SelectionMap, normalize_slug};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlState {
    pub search: Option<String>,
    pub selections: SelectionMap,
}

impl UrlState {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.selections.is_empty()
    }
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Encodes without a leading `?`; empty state encodes to an empty string.
pub fn encode_url_state(state: &UrlState, groups: &[FacetGroupConfig]) -> String {
    let mut params = Vec::new();
    if let Some(search) = state.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        params.push(format!("{SEARCH_URL_PARAM}={}", encode_component(search)));
    }
    for group in groups {
        let slugs = state.selections.get(&group.key);
        if slugs.is_empty() {
            continue;
        }
        let joined = slugs.iter().map(|slug| encode_component(slug)).collect::<Vec<_>>().join(",");
        params.push(format!("{}={joined}", encode_component(&group.key)));
    }
    params.join("&")
}

/// Decodes a query string, with or without its leading `?`.
///
/// Unknown parameters are ignored, empty values and empty list entries are
/// dropped, slugs are normalized. A repeated group parameter adds to the group.
pub fn decode_url_state(query: &str, groups: &[FacetGroupConfig]) -> UrlState {
    let query = query.trim().trim_start_matches('?');
    let mut state = UrlState::default();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if name == SEARCH_URL_PARAM {
            let value = value.trim();
            if !value.is_empty() {
                state.search = Some(value.to_string());
            }
            continue;
        }
        let Some(group) = groups.iter().find(|group| group.key == name) else {
            continue;
        };
        for slug in value.split(',').map(normalize_slug).filter(|slug| !slug.is_empty()) {
            state.selections.insert(&group.key, &slug);
        }
    }
    state
}

/// Remembers the last query string written to the URL.
///
/// Writing the same string twice is suppressed, and when the router echoes our
/// own write back as an incoming change it is recognized and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSync {
    last_emitted: Option<String>,
}

impl UrlSync {
    /// Starts from the query string the page was loaded with.
    pub fn new(current: impl Into<String>) -> Self {
        Self { last_emitted: Some(current.into()) }
    }

    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    /// Returns the string to write, or `None` when the URL already says this.
    pub fn emit(&mut self, encoded: String) -> Option<String> {
        if self.last_emitted.as_deref() == Some(encoded.as_str()) {
            return None;
        }
        self.last_emitted = Some(encoded.clone());
        Some(encoded)
    }

    /// Records an incoming URL. Returns false when it is an echo of our last write.
    pub fn accept_incoming(&mut self, canonical: String) -> bool {
        if self.last_emitted.as_deref() == Some(canonical.as_str()) {
            return false;
        }
        self.last_emitted = Some(canonical);
        true
    }
}
