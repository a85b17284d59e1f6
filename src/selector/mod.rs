//! Three-stage cascading selector: top-key, then sub-key, then leaf.
//!
//! A [`Selector`] borrows nothing from its caller; it holds the catalog
//! behind an `Arc` so many sessions can share one load, and owns its
//! [`SelectionState`] exclusively.

pub mod session;
pub mod state;

pub use session::{Selector, SelectorView};
pub use state::{SelectionState, Stage};
