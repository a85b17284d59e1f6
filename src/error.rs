//! Error taxonomy shared by the builder, the artifact codec, and the store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures that abort catalog generation or loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("source tree {path} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing catalog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("catalog failed schema validation:\n{0}")]
    Schema(String),

    #[error("catalog violates invariant: {0}")]
    Invariant(String),
}

/// A branch of the source tree that was skipped while the walk continued.
#[derive(Debug, Error)]
pub enum BranchWarning {
    #[error("skipping unreadable branch {path}: {source}")]
    BranchUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("skipping {path}: name is not valid UTF-8")]
    NonUtf8Name { path: PathBuf },
}

impl BranchWarning {
    pub fn path(&self) -> &PathBuf {
        match self {
            BranchWarning::BranchUnreadable { path, .. } | BranchWarning::NonUtf8Name { path } => {
                path
            }
        }
    }
}

/// Failure reported by a document store when opening a leaf.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("document {path} not found")]
    NotFound { path: String },

    #[error("refusing path component {component:?} in {path}")]
    InvalidPath { path: String, component: String },

    #[error("retrieving {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
