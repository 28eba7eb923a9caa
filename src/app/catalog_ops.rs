//! Catalog and filter operations for the App.

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::manifest::{AssetKind, ManifestItem};

use super::{App, PanelView};

impl App {
    /// Loads (or reloads) the manifest catalog.
    ///
    /// On failure the catalog keeps its last-known-good contents and only
    /// the manifest panel degrades; re-invoking this op retries.
    pub fn load_manifests(&mut self) -> Result<(), ApiError> {
        self.manifest_view = PanelView::Loading;
        match self.catalog.load(&self.client) {
            Ok(()) => {
                self.manifest_view = PanelView::Ready;
                Ok(())
            }
            Err(err) => {
                warn!("Manifest load failed: {}", err);
                self.manifest_view =
                    PanelView::Error(format!("Failed to load manifests: {}", err));
                Err(err)
            }
        }
    }

    /// Updates the free-text search filter.
    pub fn on_search_changed(&mut self, text: &str) {
        self.filter.search = text.to_string();
    }

    /// Includes or excludes one asset class from the view.
    pub fn on_kind_filter(&mut self, kind: AssetKind, include: bool) {
        match kind {
            AssetKind::Model => self.filter.include_models = include,
            AssetKind::AddOn => self.filter.include_addons = include,
        }
    }

    /// Flips one tag filter.
    pub fn on_tag_toggled(&mut self, tag: &str) {
        self.filter.toggle_tag(tag);
        debug!(
            "Tag filter toggled: {} ({} active)",
            tag,
            self.filter.active_tags.len()
        );
    }

    /// The catalog entries passing the current filter, in catalog order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&ManifestItem> {
        self.catalog.filtered(&self.filter).collect()
    }

    /// Distinct tags of the loaded catalog, sorted ascending.
    #[must_use]
    pub fn available_tags(&self) -> Vec<String> {
        self.catalog.available_tags()
    }

    /// Fetches detail (plus validation errors) for one entry.
    ///
    /// `key` may be a name or slug; when the entry is in the catalog its
    /// slug is preferred for the lookup.
    pub fn load_detail(&mut self, kind: AssetKind, key: &str) -> Result<(), ApiError> {
        let lookup = self
            .catalog
            .find(kind, key)
            .map_or_else(|| key.to_string(), |item| item.detail_key().to_string());

        match self.client.fetch_manifest_detail(kind, &lookup) {
            Ok(detail) => {
                self.detail = Some(detail);
                Ok(())
            }
            Err(err) => {
                warn!("Manifest detail load failed for {}: {}", lookup, err);
                self.set_status(format!("Failed to load manifest detail: {}", err));
                Err(err)
            }
        }
    }

    /// The last fetched manifest detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&crate::api::ManifestDetail> {
        self.detail.as_ref()
    }
}
