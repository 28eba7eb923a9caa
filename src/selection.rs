//! Selection bookkeeping for catalog entries.
//!
//! Selection is purely name-based and independent of the current filter
//! view: an entry stays selected while filtered out of sight, and toggling
//! a name the catalog does not know is permitted. Only an explicit clear or
//! replace drops entries.

use std::collections::BTreeSet;

use crate::manifest::AssetKind;

/// Immutable copy of the current selection, taken at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Selected base model names.
    pub models: BTreeSet<String>,
    /// Selected add-on names.
    pub addons: BTreeSet<String>,
}

impl SelectionSnapshot {
    /// True when nothing is selected in either class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.addons.is_empty()
    }

    /// Total selected entries across both classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len() + self.addons.len()
    }

    /// Model names in order, for a wire payload.
    #[must_use]
    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().cloned().collect()
    }

    /// Add-on names in order, for a wire payload.
    #[must_use]
    pub fn addon_names(&self) -> Vec<String> {
        self.addons.iter().cloned().collect()
    }
}

/// Tracks which catalog entries are currently chosen.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    models: BTreeSet<String>,
    addons: BTreeSet<String>,
}

impl SelectionTracker {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one entry's membership; returns whether it is now selected.
    pub fn toggle(&mut self, kind: AssetKind, name: &str) -> bool {
        let bucket = self.bucket_mut(kind);
        if bucket.remove(name) {
            false
        } else {
            bucket.insert(name.to_string());
            true
        }
    }

    /// Returns true when the entry is currently selected.
    #[must_use]
    pub fn is_selected(&self, kind: AssetKind, name: &str) -> bool {
        self.bucket(kind).contains(name)
    }

    /// Clears and replaces both sets atomically.
    ///
    /// Used by history reuse: prior selection is fully discarded.
    pub fn replace<M, A>(&mut self, models: M, addons: A)
    where
        M: IntoIterator<Item = String>,
        A: IntoIterator<Item = String>,
    {
        self.models = models.into_iter().collect();
        self.addons = addons.into_iter().collect();
    }

    /// Drops every selected entry.
    pub fn clear(&mut self) {
        self.models.clear();
        self.addons.clear();
    }

    /// Returns immutable copies of both sets.
    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            models: self.models.clone(),
            addons: self.addons.clone(),
        }
    }

    /// Number of selected entries of one class.
    #[must_use]
    pub fn count(&self, kind: AssetKind) -> usize {
        self.bucket(kind).len()
    }

    /// Total selected entries across both classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len() + self.addons.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.addons.is_empty()
    }

    fn bucket(&self, kind: AssetKind) -> &BTreeSet<String> {
        match kind {
            AssetKind::Model => &self.models,
            AssetKind::AddOn => &self.addons,
        }
    }

    fn bucket_mut(&mut self, kind: AssetKind) -> &mut BTreeSet<String> {
        match kind {
            AssetKind::Model => &mut self.models,
            AssetKind::AddOn => &mut self.addons,
        }
    }
}
