//! Bundled JSON Schema for the catalog artifact.
//!
//! The schema ships inside the binary so loading an artifact never depends
//! on repository layout. It covers shape and emptiness; ordering is checked
//! separately by the codec because JSON Schema cannot express it.

use crate::error::{CatalogError, Result};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Raw text of `schema/catalog.schema.json`.
pub const CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

fn compile_catalog_schema() -> Result<JSONSchema> {
    let schema: Value = serde_json::from_str(CATALOG_SCHEMA)?;
    JSONSchema::compile(&schema)
        .map_err(|err| CatalogError::Schema(format!("compiling bundled schema: {err}")))
}

/// Validate a decoded JSON document against the bundled catalog schema.
pub fn validate_catalog_value(value: &Value) -> Result<()> {
    let compiled = compile_catalog_schema()?;
    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {err}", err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::Schema(details));
    }
    Ok(())
}
