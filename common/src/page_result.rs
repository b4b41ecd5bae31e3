//! One page of results as returned by a page endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub taxonomy: String,
    #[serde(default)]
    pub buckets: Vec<FacetBucket>,
}

/// Totals that are not about the current filter set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub facets: Option<Vec<FacetGroup>>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
            total: None,
            facets: None,
            meta: PageMeta::default(),
        }
    }
}

impl<T> PageResult<T> {
    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page
    }

    pub fn facet_group(&self, taxonomy: &str) -> Option<&FacetGroup> {
        self.facets.as_ref()?.iter().find(|group| group.taxonomy == taxonomy)
    }

    /// Decodes a response body without ever failing.
    ///
    /// Anything of the wrong shape degrades to its empty value: items that do not
    /// decode are skipped, an unreadable facet payload becomes `None`, a missing
    /// `pageInfo` means there is no next page.
    pub fn from_value_lenient(value: Value, decode_item: impl Fn(Value) -> Option<T>) -> Self {
        let Value::Object(mut body) = value else {
            warn!("page response is not an object, treating as empty");
            return Self::default();
        };

        let items = match body.remove("items") {
            Some(Value::Array(raw_items)) => {
                let raw_count = raw_items.len();
                let items = raw_items.into_iter().filter_map(&decode_item).collect::<Vec<_>>();
                if items.len() != raw_count {
                    warn!("skipped {} undecodable items out of {}", raw_count - items.len(), raw_count);
                }
                items
            }
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!("page items is not an array: {other}");
                Vec::new()
            }
        };

        let page_info = match body.remove("pageInfo") {
            Some(raw) => serde_json::from_value::<PageInfo>(raw).unwrap_or_else(|e| {
                warn!("unreadable pageInfo, assuming last page: {e}");
                PageInfo::default()
            }),
            None => PageInfo::default(),
        };

        let total = body.get("total").and_then(count_value);
        let facets = body.remove("facets").and_then(lenient_facets);
        let meta = body
            .get("meta")
            .map(|meta| PageMeta {
                full_total: meta.get("fullTotal").and_then(count_value),
                overall_total: meta.get("overallTotal").and_then(count_value),
            })
            .unwrap_or_default();

        Self { items, page_info, total, facets, meta }
    }
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_facets(value: Value) -> Option<Vec<FacetGroup>> {
    let Value::Array(raw_groups) = value else {
        if !value.is_null() {
            warn!("facets payload is not an array, ignoring it");
        }
        return None;
    };
    let groups = raw_groups
        .into_iter()
        .filter_map(|raw_group| {
            let taxonomy = raw_group.get("taxonomy")?.as_str()?.to_string();
            let buckets = raw_group
                .get("buckets")
                .and_then(Value::as_array)
                .map(|raw_buckets| raw_buckets.iter().filter_map(lenient_bucket).collect())
                .unwrap_or_default();
            Some(FacetGroup { taxonomy, buckets })
        })
        .collect();
    Some(groups)
}

fn lenient_bucket(raw: &Value) -> Option<FacetBucket> {
    let slug = raw.get("slug")?.as_str()?.trim();
    if slug.is_empty() {
        return None;
    }
    Some(FacetBucket {
        slug: slug.to_string(),
        name: raw.get("name").and_then(Value::as_str).map(str::to_string),
        count: raw.get("count").and_then(count_value).unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode_str(v: Value) -> Option<String> {
        v.get("slug").and_then(Value::as_str).map(str::to_string)
    }

    #[test]
    fn decodes_a_well_formed_page() {
        let page = PageResult::from_value_lenient(
            json!({
                "items": [{"slug": "p1"}, {"slug": "p2"}],
                "pageInfo": {"hasNextPage": true, "endCursor": "c2"},
                "total": 40,
                "facets": [{"taxonomy": "category", "buckets": [{"slug": "news", "name": "News", "count": 3}]}],
                "meta": {"fullTotal": 180}
            }),
            decode_str,
        );
        assert_eq!(page.items, vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(page.page_info, PageInfo { has_next_page: true, end_cursor: Some("c2".into()) });
        assert_eq!(page.total, Some(40));
        assert_eq!(page.meta.full_total, Some(180));
        assert_eq!(page.meta.overall_total, None);
        assert_eq!(page.facet_group("category").map(|g| g.buckets.len()), Some(1));
    }

    #[test]
    fn malformed_parts_degrade_to_empty() {
        let page = PageResult::from_value_lenient(
            json!({
                "items": [{"slug": "ok"}, 17, {"title": "no slug"}],
                "pageInfo": "garbage",
                "total": "n/a",
                "facets": {"not": "a list"},
            }),
            decode_str,
        );
        assert_eq!(page.items, vec!["ok".to_string()]);
        assert!(!page.has_next_page());
        assert_eq!(page.total, None);
        assert_eq!(page.facets, None);
    }

    #[test]
    fn non_object_body_is_an_empty_page() {
        let page: PageResult<String> = PageResult::from_value_lenient(json!("<html>oops</html>"), decode_str);
        assert_eq!(page, PageResult::default());
    }

    #[test]
    fn negative_counts_clamp_and_bad_buckets_are_dropped() {
        let page: PageResult<String> = PageResult::from_value_lenient(
            json!({
                "items": [],
                "facets": [
                    {"taxonomy": "material", "buckets": [{"slug": "metal", "count": -4}, {"count": 3}, {"slug": "tile", "count": 2.0}]},
                    {"buckets": []}
                ]
            }),
            decode_str,
        );
        let facets = page.facets.unwrap();
        assert_eq!(facets.len(), 1);
        assert_eq!(
            facets[0].buckets,
            vec![
                FacetBucket { slug: "metal".into(), name: None, count: 0 },
                FacetBucket { slug: "tile".into(), name: None, count: 2 },
            ]
        );
    }
}
