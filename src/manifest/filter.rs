//! Catalog view filtering.

use std::collections::BTreeSet;

use super::item::{AssetKind, ManifestItem};

/// User-editable filter over the catalog view.
///
/// Ephemeral state: never persisted, reset with the session. An item is
/// visible only when it passes all three predicates at once: asset-kind
/// inclusion, tag intersection, and the free-text search.
#[derive(Debug, Clone)]
pub struct FilterState {
    /// Case-insensitive substring matched against name/version/license/tags.
    pub search: String,
    /// Include base models in the view.
    pub include_models: bool,
    /// Include add-on modules in the view.
    pub include_addons: bool,
    /// Active tag filters. Empty means "any tags".
    pub active_tags: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            include_models: true,
            include_addons: true,
            active_tags: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// Creates a filter that shows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the item passes every predicate.
    #[must_use]
    pub fn matches(&self, item: &ManifestItem) -> bool {
        self.kind_allowed(item.kind) && self.tags_match(item) && self.search_matches(item)
    }

    fn kind_allowed(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Model => self.include_models,
            AssetKind::AddOn => self.include_addons,
        }
    }

    /// Tag predicate: the item's tag set must intersect the active set,
    /// unless no tags are active.
    fn tags_match(&self, item: &ManifestItem) -> bool {
        self.active_tags.is_empty()
            || item.tags.iter().any(|tag| self.active_tags.contains(tag))
    }

    fn search_matches(&self, item: &ManifestItem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        item.search_haystack()
            .contains(&self.search.to_lowercase())
    }

    /// Flips one tag in or out of the active set.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
    }

    /// Returns true when the tag is currently active.
    #[must_use]
    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.active_tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Health;

    fn item(name: &str, kind: AssetKind, tags: &[&str]) -> ManifestItem {
        ManifestItem {
            name: name.to_string(),
            kind,
            version: "2.1".to_string(),
            license: "CreativeML".to_string(),
            size_bytes: None,
            checksum: String::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            health: Health::Ok,
            notes: String::new(),
            slug: None,
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = FilterState::new();
        assert!(filter.matches(&item("a", AssetKind::Model, &[])));
        assert!(filter.matches(&item("b", AssetKind::AddOn, &["style"])));
    }

    #[test]
    fn test_kind_exclusion() {
        let filter = FilterState {
            include_models: false,
            ..FilterState::new()
        };
        assert!(!filter.matches(&item("a", AssetKind::Model, &[])));
        assert!(filter.matches(&item("b", AssetKind::AddOn, &[])));
    }

    #[test]
    fn test_tag_intersection_not_subset() {
        let mut filter = FilterState::new();
        filter.toggle_tag("anime");
        // One shared tag is enough.
        assert!(filter.matches(&item("a", AssetKind::Model, &["anime", "sd15"])));
        assert!(!filter.matches(&item("b", AssetKind::Model, &["photo"])));
        assert!(!filter.matches(&item("c", AssetKind::Model, &[])));
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let filter = FilterState {
            search: "CREATIVEML".to_string(),
            ..FilterState::new()
        };
        assert!(filter.matches(&item("a", AssetKind::Model, &[])));

        let filter = FilterState {
            search: "sd15".to_string(),
            ..FilterState::new()
        };
        assert!(filter.matches(&item("a", AssetKind::Model, &["SD15"])));
        assert!(!filter.matches(&item("b", AssetKind::Model, &["sdxl"])));
    }

    #[test]
    fn test_toggle_tag_roundtrip() {
        let mut filter = FilterState::new();
        filter.toggle_tag("anime");
        assert!(filter.is_tag_active("anime"));
        filter.toggle_tag("anime");
        assert!(!filter.is_tag_active("anime"));
    }
}
