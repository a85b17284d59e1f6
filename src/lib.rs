//! Two-level document catalog and the cascading selector that browses it.
//!
//! `catalog` walks `root/<top>/<sub>/<file>` into an ordered, immutable
//! [`Catalog`] and moves it through a JSON artifact. `selector` drives the
//! top-key → sub-key → leaf narrowing over a shared catalog, and `store`
//! is the seam a leaf selection retrieves through.

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod schema;
pub mod selector;
pub mod store;

pub use catalog::{
    BuildReport, Catalog, CatalogEntry, CatalogSummary, DEFAULT_CATALOG_PATH, SubGroup, TopGroup,
    build_catalog, decode, encode, load_catalog_from_path, write_catalog,
};
pub use error::{BranchWarning, CatalogError, RetrievalError};
pub use selector::{SelectionState, Selector, SelectorView, Stage};
pub use store::{Document, DocumentPath, DocumentStore, FsStore};
