//! Document catalog: value types, the directory walk that builds them, and
//! the JSON artifact that carries them between the builder and the selector.
//!
//! Callers build with [`build_catalog`], persist with [`write_catalog`], and
//! consumers load the artifact back with [`load_catalog_from_path`]. A loaded
//! `Catalog` is never mutated; share it behind an `Arc`.

pub mod builder;
pub mod codec;
pub mod model;

pub use builder::{BuildReport, build_catalog};
pub use codec::{decode, encode, load_catalog_from_path, write_catalog};
pub use model::{Catalog, CatalogEntry, CatalogSummary, SubGroup, TopGroup};

/// Default relative path of the catalog artifact.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.json";
