//! Manifest catalog: the browsable collections of installable assets.
//!
//! The catalog holds two asset classes, base models and add-on modules
//! ("LoRAs" on the wire), and exposes filtered views over them. Catalog
//! contents are read-only; a reload replaces everything or nothing.

mod catalog;
mod filter;
mod item;

pub use catalog::Catalog;
pub use filter::FilterState;
pub use item::{format_size, AssetKind, Health, ManifestItem};
