//! Facets that restrict other facets.
//!
//! In the video archive the material and service area facets only describe
//! roofing project videos, so selecting either one forces the type facet to
//! `roofing-project`. The rule is a reducer over the selection map plus a small
//! memo recording whether the forced value came from the rule or from the
//! visitor.

use serde::{Deserialize, Serialize};

use crate::selection::{SelectionMap, normalize_slug};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRule {
    pub controlling_group: String,
    pub implied_slug: String,
    pub constrained_groups: Vec<String>,
}

/// Whether the implied value currently in the controlling group was put there by the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstraintMemo {
    pub forced: bool,
}

impl ConstraintRule {
    pub fn new(controlling_group: &str, implied_slug: &str, constrained_groups: &[&str]) -> Self {
        Self {
            controlling_group: controlling_group.to_string(),
            implied_slug: normalize_slug(implied_slug),
            constrained_groups: constrained_groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    pub fn is_constrained_active(&self, selections: &SelectionMap) -> bool {
        self.constrained_groups.iter().any(|group| selections.has_any(group))
    }

    /// True when `slug` in `group` is held in place by an active constraint.
    pub fn is_locked(&self, selections: &SelectionMap, group: &str, slug: &str) -> bool {
        group == self.controlling_group
            && normalize_slug(slug) == self.implied_slug
            && self.is_constrained_active(selections)
    }

    pub fn resolve(&self, selections: &SelectionMap, memo: ConstraintMemo) -> (SelectionMap, ConstraintMemo) {
        let mut next = selections.clone();
        let controlling = selections.get(&self.controlling_group);
        let implied_selected = controlling.iter().any(|slug| *slug == self.implied_slug);
        let only_implied = controlling.len() == 1 && implied_selected;

        if self.is_constrained_active(selections) {
            if only_implied {
                return (next, memo);
            }
            next.set_group(&self.controlling_group, [self.implied_slug.as_str()]);
            // a visitor-chosen implied value stays the visitor's
            let forced = if implied_selected { memo.forced } else { true };
            return (next, ConstraintMemo { forced });
        }

        if !memo.forced {
            return (next, memo);
        }
        if only_implied {
            next.clear_group(&self.controlling_group);
        } else if implied_selected {
            next.set_group(&self.controlling_group, [self.implied_slug.as_str()]);
        }
        (next, ConstraintMemo::default())
    }
}
