use common::archive_config::ArchiveConfig;
use common::archive_filters::FilterAction;
use common::archive_state::{ArchiveEffects, ArchiveState};
use common::chips::ChipAction;
use common::incremental_loader::{LoaderCommand, PageRequest};
use common::page_cache::PageCache;
use common::page_result::{PageInfo, PageResult};
use common::search_const::SEARCH_FILTER_KEY;
use common::url_state::UrlState;
use pretty_assertions::assert_eq;
use serde_json::json;

fn page(items: &[&str], next: Option<&str>) -> PageResult<String> {
    PageResult {
        items: items.iter().map(|s| s.to_string()).collect(),
        page_info: PageInfo { has_next_page: next.is_some(), end_cursor: next.map(str::to_string) },
        total: Some(items.len() as u64),
        ..PageResult::default()
    }
}

fn fetches(effects: &ArchiveEffects) -> Vec<PageRequest> {
    fetch_requests(&effects.commands)
}

fn fetch_requests(commands: &[LoaderCommand]) -> Vec<PageRequest> {
    commands
        .iter()
        .filter_map(|command| match command {
            LoaderCommand::Fetch(request) => Some(request.clone()),
            LoaderCommand::Abort(_) => None,
        })
        .collect()
}

fn toggle(group: &str, slug: &str) -> FilterAction {
    FilterAction::Toggle { group: group.to_string(), slug: slug.to_string() }
}

fn items(state: &ArchiveState<String>) -> Vec<String> {
    state.loader().items().cloned().collect()
}

fn mount(config: ArchiveConfig, cache: PageCache<String>) -> ArchiveState<String> {
    let (state, effects) =
        ArchiveState::mount(config, Some(page(&["a1", "a2"], Some("c1"))), &UrlState::default(), "", cache, 0);
    assert!(effects.is_empty(), "server-rendered page must not be refetched: {effects:?}");
    state
}

#[test]
fn debounced_search_sends_one_request() {
    let mut state = mount(ArchiveConfig::blog(), PageCache::new());
    for (text, now) in [("r", 0), ("ro", 100), ("roof", 200)] {
        let effects = state.dispatch(FilterAction::SearchInput { text: text.into(), now_ms: now }, now);
        assert!(effects.is_empty(), "typing must not fetch");
    }
    assert_eq!(state.next_wakeup_ms(200), Some(500));
    assert!(state.tick(499).is_empty());

    let effects = state.tick(500);
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.filters.get(SEARCH_FILTER_KEY), Some(&json!("roof")));
    assert_eq!(effects.replace_url.as_deref(), Some("q=roof"));
}

#[test]
fn superseded_results_never_land() {
    let mut state = mount(ArchiveConfig::project(), PageCache::new());
    let metal = fetches(&state.dispatch(toggle("mt", "metal"), 0)).remove(0);

    let effects = state.dispatch(toggle("mt", "tile"), 50);
    assert_eq!(effects.commands.first(), Some(&LoaderCommand::Abort(metal.id)));
    let tile = fetches(&effects).remove(0);

    assert!(!state.fetch_succeeded(metal.id, page(&["metal-1"], None), 60));
    assert!(state.fetch_succeeded(tile.id, page(&["both-1"], None), 70));
    assert_eq!(items(&state), vec!["both-1".to_string()]);
}

#[test]
fn one_fetch_per_sentinel_entry() {
    let mut state = mount(ArchiveConfig::project(), PageCache::new());

    let second = fetch_requests(&state.sentinel_changed(true)).remove(0);
    assert_eq!(second.query.after.as_deref(), Some("c1"));
    assert!(state.sentinel_changed(true).is_empty());
    assert!(state.view(0).loading_more);
    assert!(state.fetch_succeeded(second.id, page(&["a3"], Some("c2")), 10));

    // still intersecting after the append: no second fetch until it leaves
    assert!(state.sentinel_changed(true).is_empty());
    state.sentinel_changed(false);
    let third = fetch_requests(&state.sentinel_changed(true)).remove(0);
    assert_eq!(third.query.after.as_deref(), Some("c2"));
    assert!(state.fetch_succeeded(third.id, page(&["a4"], None), 20));

    state.sentinel_changed(false);
    assert!(state.sentinel_changed(true).is_empty());
    let view = state.view(1_000);
    assert_eq!(view.visible_count, 4);
    assert!(view.show_end_indicator);
    assert!(!view.has_more);
}

#[test]
fn revisiting_a_filter_set_reuses_its_pages() {
    let cache = PageCache::new();
    let mut state = mount(ArchiveConfig::project(), cache.clone());
    let metal = fetches(&state.dispatch(toggle("mt", "metal"), 0)).remove(0);
    state.fetch_succeeded(metal.id, page(&["m1"], None), 10);

    assert!(fetches(&state.dispatch(toggle("mt", "metal"), 20)).is_empty());
    assert_eq!(items(&state), vec!["a1".to_string(), "a2".to_string()]);
    assert!(fetches(&state.dispatch(toggle("mt", "metal"), 30)).is_empty());
    assert_eq!(items(&state), vec!["m1".to_string()]);
    assert_eq!(cache.len(), 2);

    // a second archive mounted on the same cache starts from it
    let (other, effects) = ArchiveState::mount(
        ArchiveConfig::project(),
        None,
        &UrlState::default(),
        "mt=metal",
        cache,
        40,
    );
    assert!(effects.is_empty());
    assert_eq!(items(&other), vec!["m1".to_string()]);
}

#[test]
fn returning_to_a_filter_set_shows_all_its_loaded_pages() {
    let cache = PageCache::new();
    let mut state = mount(ArchiveConfig::project(), cache.clone());
    let second = fetch_requests(&state.sentinel_changed(true)).remove(0);
    assert!(state.fetch_succeeded(second.id, page(&["a3"], None), 10));
    state.sentinel_changed(false);

    let metal = fetches(&state.dispatch(toggle("mt", "metal"), 20)).remove(0);
    assert!(state.fetch_succeeded(metal.id, page(&["m1"], Some("m-c1")), 30));
    assert_eq!(items(&state), vec!["m1".to_string()]);

    let effects = state.dispatch(toggle("mt", "metal"), 40);
    assert!(fetches(&effects).is_empty());
    assert_eq!(state.loader().pages(), &[page(&["a1", "a2"], Some("c1")), page(&["a3"], None)][..]);
    assert_eq!(items(&state), vec!["a1".to_string(), "a2".to_string(), "a3".to_string()]);
    assert!(state.view(1_000).show_end_indicator);
}

#[test]
fn video_material_forces_roofing_projects() {
    let mut state = mount(ArchiveConfig::video(), PageCache::new());

    let effects = state.dispatch(toggle("mt", "metal"), 0);
    assert_eq!(effects.replace_url.as_deref(), Some("bk=roofing-project&mt=metal"));
    let request = fetches(&effects).remove(0);
    assert_eq!(request.query.filters.get("buckets"), Some(&json!(["roofing-project"])));
    assert!(state.filters().is_locked(state.config(), "bk", "roofing-project"));

    let labels: Vec<String> = state.view(0).chips.into_iter().map(|chip| chip.label).collect();
    assert_eq!(labels, vec!["Roofing Projects".to_string(), "Metal".to_string()]);

    let effects = state.dispatch(
        FilterAction::RemoveChip(ChipAction::Deselect { group: "mt".into(), slug: "metal".into() }),
        10,
    );
    // the forced type goes away with the material; the unfiltered pages are cached
    assert_eq!(effects.replace_url.as_deref(), Some(""));
    assert!(state.filters().selections().is_empty());
}

#[test]
fn reset_clears_everything_in_one_step() {
    let mut state = mount(ArchiveConfig::project(), PageCache::new());
    state.dispatch(FilterAction::SearchInput { text: "cedar".into(), now_ms: 0 }, 0);
    state.dispatch(FilterAction::SubmitSearch, 0);
    state.dispatch(toggle("sa", "north-shore"), 0);
    let request = fetches(&state.dispatch(toggle("mt", "metal"), 0)).remove(0);
    state.fetch_succeeded(request.id, page(&[], None), 10);
    assert!(state.view(1_000).empty_state.is_some_and(|empty| empty.can_reset));

    let effects = state.dispatch(FilterAction::ResetAll, 1_000);
    assert_eq!(effects.replace_url.as_deref(), Some(""));
    let view = state.view(1_000);
    assert_eq!(view.empty_state, None);
    assert!(view.chips.is_empty());
    assert_eq!(view.visible_count, 2);
}
