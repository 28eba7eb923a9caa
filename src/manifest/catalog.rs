//! The loaded manifest catalog and its derived views.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, ManifestsResponse};

use super::filter::FilterState;
use super::item::{AssetKind, ManifestItem};

/// In-memory catalog of installable assets.
///
/// Reloading replaces the whole catalog atomically: a failed fetch leaves
/// the previous contents untouched, so the view keeps operating on its
/// last-known-good data while the error is surfaced for retry.
#[derive(Debug, Default)]
pub struct Catalog {
    /// All entries, models first, in manifest order.
    items: Vec<ManifestItem>,
    /// Manifest sources as reported per collection.
    model_source: Option<String>,
    addon_source: Option<String>,
    /// Validation errors from both collections.
    errors: Vec<String>,
    /// Whether a load has ever succeeded.
    loaded: bool,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the full catalog and replaces prior state entirely.
    ///
    /// On error the catalog is left as it was (never partially overwritten).
    pub fn load(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let payload = client.fetch_manifests()?;
        self.replace(payload);
        info!(
            "Catalog loaded: {} models, {} add-ons",
            self.count(AssetKind::Model),
            self.count(AssetKind::AddOn)
        );
        if !self.errors.is_empty() {
            warn!("Catalog reported {} validation error(s)", self.errors.len());
        }
        Ok(())
    }

    /// Replaces the catalog contents with a fetched payload.
    pub fn replace(&mut self, payload: ManifestsResponse) {
        let mut items =
            Vec::with_capacity(payload.models.items.len() + payload.loras.items.len());

        for mut item in payload.models.items {
            item.kind = AssetKind::Model;
            items.push(item);
        }
        for mut item in payload.loras.items {
            item.kind = AssetKind::AddOn;
            items.push(item);
        }

        self.items = items;
        self.model_source = payload.models.source;
        self.addon_source = payload.loras.source;
        self.errors = payload.models.errors;
        self.errors.extend(payload.loras.errors);
        self.loaded = true;
    }

    /// Returns all loaded entries.
    #[must_use]
    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    /// True once a load has succeeded at least once.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no entries are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries of one asset class.
    #[must_use]
    pub fn count(&self, kind: AssetKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    /// Lazily yields the entries passing every filter predicate.
    ///
    /// Each call starts a fresh pass over the current catalog.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a FilterState,
    ) -> impl Iterator<Item = &'a ManifestItem> + 'a {
        self.items.iter().filter(move |item| filter.matches(item))
    }

    /// Distinct tags across the loaded catalog, sorted ascending.
    ///
    /// Derived from the whole catalog, not the filtered view.
    #[must_use]
    pub fn available_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .items
            .iter()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(ToString::to_string).collect()
    }

    /// Looks up one entry by name or slug within an asset class.
    #[must_use]
    pub fn find(&self, kind: AssetKind, key: &str) -> Option<&ManifestItem> {
        self.items
            .iter()
            .find(|item| item.kind == kind && (item.name == key || item.detail_key() == key))
    }

    /// Manifest source for an asset class, when the backend reports one.
    #[must_use]
    pub fn source(&self, kind: AssetKind) -> Option<&str> {
        match kind {
            AssetKind::Model => self.model_source.as_deref(),
            AssetKind::AddOn => self.addon_source.as_deref(),
        }
    }

    /// Validation errors the backend reported with the manifests.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(json: &str) -> ManifestsResponse {
        serde_json::from_str(json).unwrap()
    }

    const TWO_KINDS: &str = r#"{
        "models": {"source": "curated", "items": [
            {"name": "deliberate", "tags": ["photo", "sd15"]},
            {"name": "anything-v5", "tags": ["anime"]}
        ]},
        "loras": {"items": [{"name": "detail-tweaker", "tags": ["detail", "sd15"]}]}
    }"#;

    #[test]
    fn test_replace_assigns_kinds_from_collections() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(TWO_KINDS));

        assert_eq!(catalog.count(AssetKind::Model), 2);
        assert_eq!(catalog.count(AssetKind::AddOn), 1);
        assert!(catalog.is_loaded());
        assert_eq!(catalog.source(AssetKind::Model), Some("curated"));
    }

    #[test]
    fn test_replace_is_total_not_incremental() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(TWO_KINDS));
        catalog.replace(payload(
            r#"{"models": {"items": [{"name": "only-one"}]}, "loras": {"items": []}}"#,
        ));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].name, "only-one");
        assert_eq!(catalog.source(AssetKind::Model), None);
    }

    #[test]
    fn test_available_tags_sorted_and_deduplicated() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(TWO_KINDS));

        assert_eq!(
            catalog.available_tags(),
            vec!["anime", "detail", "photo", "sd15"]
        );
    }

    #[test]
    fn test_filtered_is_fresh_per_call() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(TWO_KINDS));
        let filter = FilterState::new();

        assert_eq!(catalog.filtered(&filter).count(), 3);
        // A second pass sees the same entries again.
        assert_eq!(catalog.filtered(&filter).count(), 3);
    }

    #[test]
    fn test_find_by_name_and_slug() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(
            r#"{"models": {"items": [{"name": "Deliberate v2", "slug": "deliberate-v2"}]},
                "loras": {"items": []}}"#,
        ));

        assert!(catalog.find(AssetKind::Model, "Deliberate v2").is_some());
        assert!(catalog.find(AssetKind::Model, "deliberate-v2").is_some());
        assert!(catalog.find(AssetKind::AddOn, "deliberate-v2").is_none());
    }

    #[test]
    fn test_collection_errors_are_merged() {
        let mut catalog = Catalog::new();
        catalog.replace(payload(
            r#"{"models": {"items": [], "errors": ["models.json items[0] missing keys"]},
                "loras": {"items": [], "errors": ["loras.json failed to parse"]}}"#,
        ));

        assert_eq!(catalog.errors().len(), 2);
    }
}
