//! Per-archive configuration: facet groups, search discipline, timings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraints::ConstraintRule;
use crate::resource_kind::ResourceKind;
use crate::search_const::{
    DESKTOP_BREAKPOINT_PX, MIN_OVERLAY_MS, MIN_SEARCH_LEN, PAGE_SIZE, SEARCH_DEBOUNCE_MS, SEARCH_URL_PARAM,
    SENTINEL_MARGIN_DESKTOP_PX, SENTINEL_MARGIN_MOBILE_PX,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownOption {
    pub slug: String,
    pub label: String,
}

impl KnownOption {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self { slug: slug.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroupConfig {
    /// Selection map key, also the URL parameter name.
    pub key: String,
    /// Taxonomy of the server facet group that feeds this tab.
    pub taxonomy: String,
    /// Name of the request filter carrying the selected slugs.
    pub filter_key: String,
    pub label: String,
    #[serde(default)]
    pub known_options: Vec<KnownOption>,
}

impl FacetGroupConfig {
    pub fn new(key: &str, taxonomy: &str, filter_key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            taxonomy: taxonomy.to_string(),
            filter_key: filter_key.to_string(),
            label: label.to_string(),
            known_options: Vec::new(),
        }
    }

    pub fn with_known_options(mut self, options: &[(&str, &str)]) -> Self {
        self.known_options = options.iter().map(|(slug, label)| KnownOption::new(*slug, *label)).collect();
        self
    }

    pub fn known_label(&self, slug: &str) -> Option<&str> {
        self.known_options
            .iter()
            .find(|option| option.slug.eq_ignore_ascii_case(slug))
            .map(|option| option.label.as_str())
    }
}

/// When typed search text becomes the text sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchDiscipline {
    /// Only on Enter or the search button.
    Submit,
    /// After the input has been quiet for `delay_ms`.
    Debounce { delay_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub kind: ResourceKind,
    pub page_size: u32,
    pub min_search_len: usize,
    pub search_discipline: SearchDiscipline,
    pub facet_groups: Vec<FacetGroupConfig>,
    pub constraint: Option<ConstraintRule>,
    pub min_overlay_ms: u64,
    pub sentinel_margin_desktop_px: u32,
    pub sentinel_margin_mobile_px: u32,
    pub desktop_breakpoint_px: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            kind: ResourceKind::Blog,
            page_size: PAGE_SIZE,
            min_search_len: MIN_SEARCH_LEN,
            search_discipline: SearchDiscipline::Submit,
            facet_groups: Vec::new(),
            constraint: None,
            min_overlay_ms: MIN_OVERLAY_MS,
            sentinel_margin_desktop_px: SENTINEL_MARGIN_DESKTOP_PX,
            sentinel_margin_mobile_px: SENTINEL_MARGIN_MOBILE_PX,
            desktop_breakpoint_px: DESKTOP_BREAKPOINT_PX,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("debounce delay must be greater than zero")]
    ZeroDebounce,

    #[error("duplicate facet group key: {0}")]
    DuplicateGroupKey(String),

    #[error("facet group key {0:?} collides with the search parameter")]
    ReservedGroupKey(String),

    #[error("constraint refers to unknown facet group: {0}")]
    UnknownConstraintGroup(String),
}

impl ArchiveConfig {
    /// Blog posts: one category facet, search applies as the visitor types.
    pub fn blog() -> Self {
        Self {
            kind: ResourceKind::Blog,
            search_discipline: SearchDiscipline::Debounce { delay_ms: SEARCH_DEBOUNCE_MS },
            facet_groups: vec![FacetGroupConfig::new("cat", "category", "categories", "Topics")],
            ..Self::default()
        }
    }

    /// Videos: material and service area only make sense for roofing project videos.
    pub fn video() -> Self {
        Self {
            kind: ResourceKind::Video,
            search_discipline: SearchDiscipline::Submit,
            facet_groups: vec![
                FacetGroupConfig::new("bk", "video_bucket", "buckets", "Type").with_known_options(&[
                    ("roofing-project", "Roofing Projects"),
                    ("educational", "Educational"),
                    ("testimonial", "Testimonials"),
                ]),
                FacetGroupConfig::new("mt", "material", "materials", "Material"),
                FacetGroupConfig::new("sa", "service_area", "serviceAreas", "Service Area"),
            ],
            constraint: Some(ConstraintRule::new("bk", "roofing-project", &["mt", "sa"])),
            ..Self::default()
        }
    }

    pub fn project() -> Self {
        Self {
            kind: ResourceKind::Project,
            search_discipline: SearchDiscipline::Submit,
            facet_groups: vec![
                FacetGroupConfig::new("mt", "material", "materials", "Material"),
                FacetGroupConfig::new("sa", "service_area", "serviceAreas", "Service Area"),
            ],
            ..Self::default()
        }
    }

    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Blog => Self::blog(),
            ResourceKind::Video => Self::video(),
            ResourceKind::Project => Self::project(),
        }
    }

    pub fn group(&self, key: &str) -> Option<&FacetGroupConfig> {
        self.facet_groups.iter().find(|group| group.key == key)
    }

    pub fn sentinel_margin_px(&self, viewport_width_px: u32) -> u32 {
        if viewport_width_px >= self.desktop_breakpoint_px {
            self.sentinel_margin_desktop_px
        } else {
            self.sentinel_margin_mobile_px
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if let SearchDiscipline::Debounce { delay_ms: 0 } = self.search_discipline {
            return Err(ConfigError::ZeroDebounce);
        }
        let mut keys = BTreeSet::new();
        for group in &self.facet_groups {
            if group.key == SEARCH_URL_PARAM {
                return Err(ConfigError::ReservedGroupKey(group.key.clone()));
            }
            if !keys.insert(group.key.as_str()) {
                return Err(ConfigError::DuplicateGroupKey(group.key.clone()));
            }
        }
        if let Some(rule) = &self.constraint {
            for key in std::iter::once(&rule.controlling_group).chain(rule.constrained_groups.iter()) {
                if !keys.contains(key.as_str()) {
                    return Err(ConfigError::UnknownConstraintGroup(key.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn presets_are_valid() {
        for kind in ResourceKind::ALL {
            let config = ArchiveConfig::for_kind(kind);
            assert_eq!(config.kind, kind);
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn blog_debounces_and_video_submits() {
        assert_eq!(ArchiveConfig::blog().search_discipline, SearchDiscipline::Debounce { delay_ms: 300 });
        assert_eq!(ArchiveConfig::video().search_discipline, SearchDiscipline::Submit);
    }

    #[test]
    fn rejects_bad_configs() {
        let mut config = ArchiveConfig::project();
        config.page_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));

        let mut config = ArchiveConfig::project();
        config.facet_groups.push(FacetGroupConfig::new("mt", "x", "x", "Again"));
        assert_eq!(config.validate(), Err(ConfigError::DuplicateGroupKey("mt".into())));

        let mut config = ArchiveConfig::project();
        config.facet_groups.push(FacetGroupConfig::new("q", "x", "x", "Search"));
        assert_eq!(config.validate(), Err(ConfigError::ReservedGroupKey("q".into())));

        let mut config = ArchiveConfig::project();
        config.constraint = Some(ConstraintRule::new("bk", "roofing-project", &["mt"]));
        assert_eq!(config.validate(), Err(ConfigError::UnknownConstraintGroup("bk".into())));

        let mut config = ArchiveConfig::blog();
        config.search_discipline = SearchDiscipline::Debounce { delay_ms: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ArchiveConfig = serde_json::from_value(serde_json::json!({
            "kind": "project",
            "search_discipline": {"mode": "debounce", "delay_ms": 250},
            "facet_groups": [{"key": "mt", "taxonomy": "material", "filter_key": "materials", "label": "Material"}]
        }))
        .unwrap();
        assert_eq!(config.page_size, PAGE_SIZE);
        assert_eq!(config.search_discipline, SearchDiscipline::Debounce { delay_ms: 250 });
        assert_eq!(config.group("mt").map(|g| g.taxonomy.as_str()), Some("material"));
    }

    #[test]
    fn sentinel_margin_depends_on_viewport() {
        let config = ArchiveConfig::blog();
        assert_eq!(config.sentinel_margin_px(1440), 800);
        assert_eq!(config.sentinel_margin_px(390), 300);
    }
}
