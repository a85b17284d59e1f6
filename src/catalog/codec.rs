//! Artifact encoding and loading.
//!
//! The on-disk form is pretty-printed JSON with sorted keys and a trailing
//! newline, so two builds of the same tree produce identical bytes. Decoding
//! is strict: the document must match the bundled schema and every leaf
//! list must be in ascending order.

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use crate::schema::validate_catalog_value;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize a catalog into its canonical text form.
pub fn encode(catalog: &Catalog) -> Result<String> {
    let mut text = serde_json::to_string_pretty(catalog)?;
    text.push('\n');
    Ok(text)
}

/// Parse and validate catalog text.
pub fn decode(text: &str) -> Result<Catalog> {
    let value: Value = serde_json::from_str(text)?;
    validate_catalog_value(&value)?;
    let catalog: Catalog = serde_json::from_value(value)?;
    check_leaf_order(&catalog)?;
    Ok(catalog)
}

/// Read and decode the artifact at `path`.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&text)
}

/// Encode `catalog` and replace `path` with it in one rename.
///
/// The bytes go to a temporary file beside the destination first, so readers
/// see either the previous artifact or the complete new one.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let text = encode(catalog)?;
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(text.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

fn check_leaf_order(catalog: &Catalog) -> Result<()> {
    for (top_key, group) in catalog.iter() {
        for (sub_key, leaves) in group.iter() {
            let entries = leaves.entries();
            if let Some(pair) = entries.windows(2).find(|pair| pair[0] >= pair[1]) {
                return Err(CatalogError::Invariant(format!(
                    "leaves under {top_key}/{sub_key} are not in ascending order ({:?} before {:?})",
                    pair[0].as_str(),
                    pair[1].as_str()
                )));
            }
        }
    }
    Ok(())
}
