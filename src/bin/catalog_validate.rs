//! Validate a catalog artifact against the bundled schema and ordering rules.
//!
//! Usage:
//!   catalog-validate --catalog catalog.json

use anyhow::{Context, Result};
use cascade_catalog::config::resolve_catalog_path;
use cascade_catalog::{load_catalog_from_path, logging};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-validate")]
#[command(about = "Check a catalog artifact for shape and ordering")]
struct Cli {
    /// Artifact path (or set CASCADE_CATALOG_PATH; defaults to catalog.json).
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let path = resolve_catalog_path(cli.catalog.as_deref());
    let catalog = load_catalog_from_path(&path)
        .with_context(|| format!("validating {}", path.display()))?;
    let summary = catalog.summary();
    println!(
        "{}: ok ({} top-keys, {} sub-keys, {} leaves)",
        path.display(),
        summary.top_keys,
        summary.sub_keys,
        summary.leaves
    );
    Ok(())
}
