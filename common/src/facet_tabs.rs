//! Facet pills derived from the latest server buckets.

use std::collections::BTreeSet;

use crate::archive_config::FacetGroupConfig;
use crate::page_result::FacetGroup;
use crate::selection::{SelectionMap, normalize_slug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPill {
    pub slug: String,
    pub label: String,
    pub count: u64,
    pub selected: bool,
    /// Shown but not clickable.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetTab {
    pub key: String,
    pub label: String,
    pub pills: Vec<FacetPill>,
}

impl FacetTab {
    pub fn selected_count(&self) -> usize {
        self.pills.iter().filter(|pill| pill.selected).count()
    }
}

/// "north-shore" -> "North Shore"
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the pills of one facet group.
///
/// Server buckets come first in server order, then configured options the
/// server did not report, then selected slugs nobody reported. Missing entries
/// count 0. A pill is disabled only when it matches nothing, is not selected,
/// and some filter is active.
pub fn derive_pills(
    group: &FacetGroupConfig,
    buckets: Option<&FacetGroup>,
    selections: &SelectionMap,
    any_filter_active: bool,
) -> Vec<FacetPill> {
    let mut seen = BTreeSet::new();
    let mut pills = Vec::new();

    let mut push = |slug: &str, server_name: Option<&str>, count: u64| {
        let slug = normalize_slug(slug);
        if slug.is_empty() || !seen.insert(slug.clone()) {
            return;
        }
        let label = group
            .known_label(&slug)
            .map(str::to_string)
            .or_else(|| server_name.filter(|name| !name.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| humanize_slug(&slug));
        let selected = selections.contains(&group.key, &slug);
        let disabled = count == 0 && !selected && any_filter_active;
        pills.push(FacetPill { slug, label, count, selected, disabled });
    };

    for bucket in buckets.map(|g| g.buckets.as_slice()).unwrap_or(&[]) {
        push(&bucket.slug, bucket.name.as_deref(), bucket.count);
    }
    for option in &group.known_options {
        push(&option.slug, None, 0);
    }
    for slug in selections.get(&group.key) {
        push(slug, None, 0);
    }
    pills
}

/// One tab per configured group, fed by the server group with the same taxonomy.
pub fn derive_tabs(
    groups: &[FacetGroupConfig],
    facets: &[FacetGroup],
    selections: &SelectionMap,
    any_filter_active: bool,
) -> Vec<FacetTab> {
    groups
        .iter()
        .map(|group| {
            let buckets = facets.iter().find(|facet| facet.taxonomy == group.taxonomy);
            FacetTab {
                key: group.key.clone(),
                label: group.label.clone(),
                pills: derive_pills(group, buckets, selections, any_filter_active),
            }
        })
        .collect()
}
