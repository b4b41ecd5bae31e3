//! Removable chips for the active search and selections.

use crate::archive_config::ArchiveConfig;
use crate::facet_tabs::humanize_slug;
use crate::selection::SelectionMap;

/// What removing a chip does. Each variant inverts the action that created the chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipAction {
    ClearSearch,
    Deselect { group: String, slug: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChip {
    pub label: String,
    /// Facet group label, `None` for the search chip.
    pub group_label: Option<String>,
    pub on_remove: ChipAction,
}

impl ActiveChip {
    /// Stable list key.
    pub fn key(&self) -> String {
        match &self.on_remove {
            ChipAction::ClearSearch => "search".to_string(),
            ChipAction::Deselect { group, slug } => format!("{group}:{slug}"),
        }
    }
}

/// The search chip first, then selections in group order and selection order.
pub fn active_chips(config: &ArchiveConfig, effective_search: Option<&str>, selections: &SelectionMap) -> Vec<ActiveChip> {
    let mut chips = Vec::new();
    if let Some(search) = effective_search {
        chips.push(ActiveChip {
            label: format!("\u{201c}{search}\u{201d}"),
            group_label: None,
            on_remove: ChipAction::ClearSearch,
        });
    }
    for group in &config.facet_groups {
        for slug in selections.get(&group.key) {
            let label = group.known_label(slug).map(str::to_string).unwrap_or_else(|| humanize_slug(slug));
            chips.push(ActiveChip {
                label,
                group_label: Some(group.label.clone()),
                on_remove: ChipAction::Deselect { group: group.key.clone(), slug: slug.clone() },
            });
        }
    }
    chips
}
