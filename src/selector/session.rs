//! Cascading selector session over an immutable catalog.

use crate::catalog::{Catalog, CatalogEntry, CatalogSummary, SubGroup};
use crate::error::RetrievalError;
use crate::selector::state::{SelectionState, Stage};
use crate::store::{Document, DocumentPath, DocumentStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One user's walk through the catalog.
///
/// Transitions take `&mut self`, so each one finishes, derived views
/// included, before another can start. Rejected transitions return `false`
/// and leave the state untouched.
pub struct Selector<S> {
    catalog: Arc<Catalog>,
    store: S,
    state: SelectionState,
    summary: CatalogSummary,
}

/// Owned copy of everything a presentation surface renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    pub selected_top: Option<String>,
    pub selected_sub: Option<String>,
    pub top_keys: Vec<String>,
    pub sub_keys: Vec<String>,
    pub leaves: Vec<String>,
    pub summary: CatalogSummary,
}

impl<S: DocumentStore> Selector<S> {
    pub fn new(catalog: Arc<Catalog>, store: S) -> Self {
        let summary = catalog.summary();
        Self {
            catalog,
            store,
            state: SelectionState::Empty,
            summary,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    /// Counts fixed at construction.
    pub fn summary(&self) -> CatalogSummary {
        self.summary
    }

    /// Choose a top-key. Any sub-key selection is discarded, even one whose
    /// name also exists under the new top-key.
    pub fn select_top(&mut self, key: &str) -> bool {
        if self.catalog.get(key).is_none() {
            debug!(top = key, "rejected top-key selection: unknown key");
            return false;
        }
        self.state = SelectionState::TopChosen {
            top: key.to_string(),
        };
        debug!(top = key, "selected top-key");
        true
    }

    /// Choose a sub-key under the current top-key.
    pub fn select_sub(&mut self, key: &str) -> bool {
        let Some(top) = self.state.selected_top() else {
            debug!(sub = key, "rejected sub-key selection: no top-key chosen");
            return false;
        };
        if self.catalog.sub_group(top, key).is_none() {
            debug!(top, sub = key, "rejected sub-key selection: not under current top-key");
            return false;
        }
        let top = top.to_string();
        debug!(top = %top, sub = key, "selected sub-key");
        self.state = SelectionState::SubChosen {
            top,
            sub: key.to_string(),
        };
        true
    }

    /// Open a visible leaf through the store.
    ///
    /// `None` means the selection was rejected (no sub-key chosen, or the
    /// identifier is not in the visible leaf list). `Some(Err(_))` is a store
    /// failure, returned as-is and never retried. State is not changed.
    pub fn select_leaf(&self, identifier: &str) -> Option<Result<Document, RetrievalError>> {
        let SelectionState::SubChosen { top, sub } = &self.state else {
            debug!(leaf = identifier, "rejected leaf selection: no sub-key chosen");
            return None;
        };
        if !self.current_leaves()?.contains(identifier) {
            debug!(%top, %sub, leaf = identifier, "rejected leaf selection: not visible");
            return None;
        }
        let path = DocumentPath::new(top.as_str(), sub.as_str(), identifier);
        debug!(%path, "retrieving document");
        Some(self.store.open(&path))
    }

    pub fn visible_top_keys(&self) -> Vec<&str> {
        self.catalog.top_keys().collect()
    }

    /// Sub-keys of the chosen top-key; empty before one is chosen.
    pub fn visible_sub_keys(&self) -> Vec<&str> {
        self.state
            .selected_top()
            .and_then(|top| self.catalog.get(top))
            .map(|group| group.sub_keys().collect())
            .unwrap_or_default()
    }

    /// Leaves of the chosen sub-key; empty before one is chosen.
    pub fn visible_leaves(&self) -> &[CatalogEntry] {
        self.current_leaves()
            .map(SubGroup::entries)
            .unwrap_or_default()
    }

    pub fn view(&self) -> SelectorView {
        SelectorView {
            selected_top: self.state.selected_top().map(str::to_string),
            selected_sub: self.state.selected_sub().map(str::to_string),
            top_keys: self.catalog.top_keys().map(str::to_string).collect(),
            sub_keys: self
                .visible_sub_keys()
                .into_iter()
                .map(str::to_string)
                .collect(),
            leaves: self
                .visible_leaves()
                .iter()
                .map(|entry| entry.0.clone())
                .collect(),
            summary: self.summary,
        }
    }

    fn current_leaves(&self) -> Option<&SubGroup> {
        match &self.state {
            SelectionState::SubChosen { top, sub } => self.catalog.sub_group(top, sub),
            _ => None,
        }
    }
}
