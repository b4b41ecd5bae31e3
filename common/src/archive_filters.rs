//! Search text and facet selections of one archive, and everything derived from them.

use serde_json::json;

use crate::archive_config::ArchiveConfig;
use crate::chips::{ActiveChip, ChipAction, active_chips};
use crate::constraints::ConstraintMemo;
use crate::facet_tabs::{FacetTab, derive_tabs};
use crate::page_result::FacetGroup;
use crate::resource_query::{FilterMap, ResourceQuery};
use crate::search_const::SEARCH_FILTER_KEY;
use crate::search_text::{SearchEvent, SearchText};
use crate::selection::SelectionMap;
use crate::url_state::{UrlState, decode_url_state, encode_url_state};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SearchInput { text: String, now_ms: u64 },
    SubmitSearch,
    Tick { now_ms: u64 },
    ClearSearch,
    Toggle { group: String, slug: String },
    ClearGroup(String),
    RemoveChip(ChipAction),
    ResetAll,
    Restore(UrlState),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveFilters {
    search: SearchText,
    selections: SelectionMap,
    constraint_memo: ConstraintMemo,
}

impl ArchiveFilters {
    pub fn new(config: &ArchiveConfig, state: UrlState) -> Self {
        let mut filters = Self::default();
        filters.restore(config, state);
        filters
    }

    /// State at mount: the URL wins; server-supplied initial filters apply when the URL carries none.
    pub fn from_url(config: &ArchiveConfig, query: &str, initial: &UrlState) -> Self {
        let from_url = decode_url_state(query, &config.facet_groups);
        if from_url.is_empty() {
            Self::new(config, initial.clone())
        } else {
            Self::new(config, from_url)
        }
    }

    pub fn search(&self) -> &SearchText {
        &self.search
    }

    pub fn selections(&self) -> &SelectionMap {
        &self.selections
    }

    pub fn constraint_memo(&self) -> ConstraintMemo {
        self.constraint_memo
    }

    pub fn effective_search(&self, config: &ArchiveConfig) -> Option<&str> {
        self.search.effective(config.min_search_len)
    }

    pub fn any_filter_active(&self, config: &ArchiveConfig) -> bool {
        self.effective_search(config).is_some() || !self.selections.is_empty()
    }

    /// Applies one action. Returns true when the request filters changed.
    pub fn apply(&mut self, config: &ArchiveConfig, action: FilterAction) -> bool {
        let before = self.request_filters(config);
        let discipline = config.search_discipline;
        match action {
            FilterAction::SearchInput { text, now_ms } => {
                self.search = self.search.apply(SearchEvent::Input { text, now_ms }, discipline);
            }
            FilterAction::SubmitSearch => {
                self.search = self.search.apply(SearchEvent::Submit, discipline);
            }
            FilterAction::Tick { now_ms } => {
                self.search = self.search.apply(SearchEvent::Tick { now_ms }, discipline);
            }
            FilterAction::ClearSearch | FilterAction::RemoveChip(ChipAction::ClearSearch) => {
                self.search = self.search.apply(SearchEvent::Clear, discipline);
            }
            FilterAction::Toggle { group, slug } => {
                if config.group(&group).is_some() {
                    self.selections.toggle(&group, &slug);
                    self.resolve_constraints(config);
                }
            }
            FilterAction::RemoveChip(ChipAction::Deselect { group, slug }) => {
                self.selections.remove(&group, &slug);
                self.resolve_constraints(config);
            }
            FilterAction::ClearGroup(group) => {
                self.selections.clear_group(&group);
                self.resolve_constraints(config);
            }
            FilterAction::ResetAll => {
                self.search = SearchText::default();
                self.selections.clear();
                self.constraint_memo = ConstraintMemo::default();
            }
            FilterAction::Restore(state) => self.restore(config, state),
        }
        self.request_filters(config) != before
    }

    fn restore(&mut self, config: &ArchiveConfig, state: UrlState) {
        self.search = SearchText::new(state.search.unwrap_or_default());
        self.selections = SelectionMap::new();
        for group in &config.facet_groups {
            self.selections.set_group(&group.key, state.selections.get(&group.key));
        }
        // a restored implied value under an active constraint is assumed to be the rule's
        self.constraint_memo = ConstraintMemo {
            forced: config.constraint.as_ref().is_some_and(|rule| rule.is_constrained_active(&self.selections)),
        };
        self.resolve_constraints(config);
    }

    fn resolve_constraints(&mut self, config: &ArchiveConfig) {
        if let Some(rule) = &config.constraint {
            let (selections, memo) = rule.resolve(&self.selections, self.constraint_memo);
            self.selections = selections;
            self.constraint_memo = memo;
        }
    }

    /// Filters sent with page requests: the effective search and every non-empty group.
    pub fn request_filters(&self, config: &ArchiveConfig) -> FilterMap {
        let mut filters = FilterMap::new();
        if let Some(search) = self.effective_search(config) {
            filters.insert(SEARCH_FILTER_KEY.to_string(), json!(search));
        }
        for group in &config.facet_groups {
            let slugs = self.selections.get(&group.key);
            if !slugs.is_empty() {
                let mut sorted = slugs.to_vec();
                sorted.sort();
                filters.insert(group.filter_key.clone(), json!(sorted));
            }
        }
        filters
    }

    pub fn query(&self, config: &ArchiveConfig) -> ResourceQuery {
        ResourceQuery::new(config.page_size, self.request_filters(config))
    }

    pub fn url_state(&self, config: &ArchiveConfig) -> UrlState {
        UrlState {
            search: self.effective_search(config).map(str::to_string),
            selections: self.selections.clone(),
        }
    }

    pub fn encoded_url(&self, config: &ArchiveConfig) -> String {
        encode_url_state(&self.url_state(config), &config.facet_groups)
    }

    pub fn tabs(&self, config: &ArchiveConfig, facets: &[FacetGroup]) -> Vec<FacetTab> {
        derive_tabs(&config.facet_groups, facets, &self.selections, self.any_filter_active(config))
    }

    pub fn chips(&self, config: &ArchiveConfig) -> Vec<ActiveChip> {
        active_chips(config, self.effective_search(config), &self.selections)
    }

    /// True when the pill cannot be toggled off because a constraint requires it.
    pub fn is_locked(&self, config: &ArchiveConfig, group: &str, slug: &str) -> bool {
        config.constraint.as_ref().is_some_and(|rule| rule.is_locked(&self.selections, group, slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_result::FacetBucket;
    use pretty_assertions::assert_eq;

    fn toggle(group: &str, slug: &str) -> FilterAction {
        FilterAction::Toggle { group: group.to_string(), slug: slug.to_string() }
    }

    fn typed(text: &str, now_ms: u64) -> FilterAction {
        FilterAction::SearchInput { text: text.to_string(), now_ms }
    }

    #[test]
    fn one_character_search_is_not_sent() {
        let config = ArchiveConfig::project();
        let mut filters = ArchiveFilters::default();
        filters.apply(&config, typed("m", 0));
        assert!(!filters.apply(&config, FilterAction::SubmitSearch));
        assert_eq!(filters.search().committed(), "m");
        assert!(!filters.request_filters(&config).contains_key("search"));
        assert_eq!(filters.encoded_url(&config), "");
        assert!(!filters.any_filter_active(&config));

        filters.apply(&config, typed("me", 10));
        assert!(filters.apply(&config, FilterAction::SubmitSearch));
        assert_eq!(filters.request_filters(&config).get("search"), Some(&json!("me")));
        assert_eq!(filters.encoded_url(&config), "q=me");
    }

    #[test]
    fn debounced_search_commits_on_tick() {
        let config = ArchiveConfig::blog();
        let mut filters = ArchiveFilters::default();
        assert!(!filters.apply(&config, typed("roofing", 1_000)));
        assert!(!filters.apply(&config, FilterAction::Tick { now_ms: 1_100 }));
        assert!(filters.apply(&config, FilterAction::Tick { now_ms: 1_300 }));
        assert_eq!(filters.effective_search(&config), Some("roofing"));
    }

    #[test]
    fn toggles_feed_request_filters_sorted() {
        let config = ArchiveConfig::project();
        let mut filters = ArchiveFilters::default();
        assert!(filters.apply(&config, toggle("mt", "tile")));
        assert!(filters.apply(&config, toggle("mt", "Metal")));
        assert_eq!(filters.request_filters(&config).get("materials"), Some(&json!(["metal", "tile"])));
        // unknown groups are ignored
        assert!(!filters.apply(&config, toggle("zz", "metal")));
    }

    #[test]
    fn constraint_applies_after_every_toggle() {
        let config = ArchiveConfig::video();
        let mut filters = ArchiveFilters::default();
        filters.apply(&config, toggle("mt", "metal"));
        assert_eq!(filters.selections().get("bk"), ["roofing-project".to_string()]);
        assert!(filters.is_locked(&config, "bk", "roofing-project"));
        // toggling the locked value off does not stick
        filters.apply(&config, toggle("bk", "roofing-project"));
        assert_eq!(filters.selections().get("bk"), ["roofing-project".to_string()]);
        filters.apply(&config, toggle("mt", "metal"));
        assert!(filters.selections().is_empty());
    }

    #[test]
    fn chip_removal_inverts_its_action() {
        let config = ArchiveConfig::project();
        let mut filters = ArchiveFilters::default();
        filters.apply(&config, typed("oak", 0));
        filters.apply(&config, FilterAction::SubmitSearch);
        filters.apply(&config, toggle("sa", "north-shore"));
        let before_select = {
            let mut f = ArchiveFilters::default();
            f.apply(&config, typed("oak", 0));
            f.apply(&config, FilterAction::SubmitSearch);
            f
        };
        let chips = filters.chips(&config);
        assert_eq!(chips.len(), 2);

        let mut removed_selection = filters.clone();
        removed_selection.apply(&config, FilterAction::RemoveChip(chips[1].on_remove.clone()));
        assert_eq!(removed_selection, before_select);

        filters.apply(&config, FilterAction::RemoveChip(chips[0].on_remove.clone()));
        assert_eq!(filters.search().draft(), "");
        assert_eq!(filters.search().committed(), "");
    }

    #[test]
    fn url_wins_over_initial_filters() {
        let config = ArchiveConfig::project();
        let initial = UrlState { search: None, selections: SelectionMap::from_groups([("mt", vec!["tile"])]) };
        let from_url = ArchiveFilters::from_url(&config, "?mt=metal", &initial);
        assert_eq!(from_url.selections(), &SelectionMap::from_groups([("mt", vec!["metal"])]));
        let from_initial = ArchiveFilters::from_url(&config, "", &initial);
        assert_eq!(from_initial.selections(), &SelectionMap::from_groups([("mt", vec!["tile"])]));
    }

    #[test]
    fn restore_reverts_a_forced_value_later() {
        let config = ArchiveConfig::video();
        let mut filters = ArchiveFilters::from_url(&config, "bk=roofing-project&mt=metal", &UrlState::default());
        assert!(filters.constraint_memo().forced);
        filters.apply(&config, toggle("mt", "metal"));
        assert!(filters.selections().is_empty());
    }

    #[test]
    fn tabs_disable_against_all_filters() {
        let config = ArchiveConfig::project();
        let facets = vec![FacetGroup {
            taxonomy: "material".into(),
            buckets: vec![
                FacetBucket { slug: "a".into(), name: None, count: 5 },
                FacetBucket { slug: "b".into(), name: None, count: 0 },
            ],
        }];
        let mut filters = ArchiveFilters::default();
        let tabs = filters.tabs(&config, &facets);
        assert!(tabs[0].pills.iter().all(|p| !p.disabled));

        filters.apply(&config, typed("cedar", 0));
        filters.apply(&config, FilterAction::SubmitSearch);
        let tabs = filters.tabs(&config, &facets);
        assert_eq!(tabs[0].pills.iter().map(|p| p.disabled).collect::<Vec<_>>(), vec![false, true]);
    }

    #[test]
    fn reset_clears_everything() {
        let config = ArchiveConfig::video();
        let mut filters = ArchiveFilters::from_url(&config, "q=cedar&mt=metal", &UrlState::default());
        assert!(filters.apply(&config, FilterAction::ResetAll));
        assert_eq!(filters, ArchiveFilters::default());
    }
}
