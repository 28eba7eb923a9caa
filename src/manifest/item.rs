//! Catalog entry types.

use serde::{Deserialize, Serialize};

/// Asset class of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// A base model.
    #[default]
    Model,
    /// An add-on module applied alongside a base model.
    AddOn,
}

impl AssetKind {
    /// URL segment used by the manifest endpoints.
    #[must_use]
    pub fn api_segment(self) -> &'static str {
        match self {
            AssetKind::Model => "models",
            AssetKind::AddOn => "loras",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Model => "Model",
            AssetKind::AddOn => "LoRA",
        }
    }

    /// Parses the wire/CLI spelling of an asset kind.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "model" | "models" => Some(AssetKind::Model),
            "lora" | "loras" | "addon" | "addons" | "add-on" => Some(AssetKind::AddOn),
            _ => None,
        }
    }
}

/// Health flag reported by the backend's manifest validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    #[default]
    Ok,
    Warning,
}

impl Health {
    /// Display label matching the dashboard wording.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Health::Ok => "Healthy",
            Health::Warning => "Needs attention",
        }
    }
}

/// One installable asset as described by the catalog.
///
/// Immutable once fetched; a catalog reload replaces the whole set.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestItem {
    /// Unique name within its asset class.
    pub name: String,
    /// Asset class. Not on the wire; assigned from the owning collection.
    #[serde(skip)]
    pub kind: AssetKind,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub license: String,
    /// Download size, when the manifest reports one.
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub health: Health,
    #[serde(default)]
    pub notes: String,
    /// Stable key for detail lookups; falls back to `name` when absent.
    #[serde(default)]
    pub slug: Option<String>,
}

impl ManifestItem {
    /// Key used for the detail endpoint: slug when present, else name.
    #[must_use]
    pub fn detail_key(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.name)
    }

    /// Lowercased text the free-text filter searches over.
    #[must_use]
    pub fn search_haystack(&self) -> String {
        let mut haystack = String::with_capacity(
            self.name.len() + self.version.len() + self.license.len() + 16,
        );
        haystack.push_str(&self.name);
        haystack.push(' ');
        haystack.push_str(&self.version);
        haystack.push(' ');
        haystack.push_str(&self.license);
        for tag in &self.tags {
            haystack.push(' ');
            haystack.push_str(tag);
        }
        haystack.to_lowercase()
    }
}

/// Formats a byte count as a short human-readable size (one decimal).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
