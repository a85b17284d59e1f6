//! Path resolution shared by the binaries.
//!
//! Every setting resolves in the same order: explicit CLI flag, then the
//! environment variable, then the default (if the setting has one). Empty
//! environment values count as unset.

use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_PATH;

pub const ENV_SOURCE_ROOT: &str = "CASCADE_SOURCE_ROOT";
pub const ENV_CATALOG_PATH: &str = "CASCADE_CATALOG_PATH";
pub const ENV_STORE_ROOT: &str = "CASCADE_STORE_ROOT";

pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn resolve(cli_value: Option<&Path>, env_value: Option<String>) -> Option<PathBuf> {
    cli_value
        .map(Path::to_path_buf)
        .or_else(|| env_value.map(PathBuf::from))
}

/// Source tree the builder walks. There is no default.
pub fn resolve_source_root(cli_value: Option<&Path>) -> Result<PathBuf> {
    match resolve(cli_value, env_non_empty(ENV_SOURCE_ROOT)) {
        Some(path) => Ok(path),
        None => bail!("no source tree given; pass --root or set {ENV_SOURCE_ROOT}"),
    }
}

/// Catalog artifact location, defaulting to [`DEFAULT_CATALOG_PATH`].
pub fn resolve_catalog_path(cli_value: Option<&Path>) -> PathBuf {
    resolve(cli_value, env_non_empty(ENV_CATALOG_PATH))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}

/// Base directory documents are retrieved from. There is no default.
pub fn resolve_store_root(cli_value: Option<&Path>) -> Result<PathBuf> {
    match resolve(cli_value, env_non_empty(ENV_STORE_ROOT)) {
        Some(path) => Ok(path),
        None => bail!("no document store given; pass --store or set {ENV_STORE_ROOT}"),
    }
}
