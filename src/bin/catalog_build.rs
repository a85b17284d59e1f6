//! Walks a document tree and writes the catalog artifact.
//!
//! Usage:
//!   catalog-build --root docs/ --output catalog.json
//!   catalog-build --root docs/ --check

use anyhow::{Context, Result, bail};
use cascade_catalog::config::{resolve_catalog_path, resolve_source_root};
use cascade_catalog::{Catalog, build_catalog, encode, logging, write_catalog};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-build")]
#[command(about = "Build the document catalog from a two-level directory tree")]
struct Cli {
    /// Source tree root (or set CASCADE_SOURCE_ROOT).
    #[arg(long)]
    root: Option<PathBuf>,
    /// Artifact path (or set CASCADE_CATALOG_PATH; defaults to catalog.json).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Compare against the existing artifact instead of writing; fails when stale.
    #[arg(long)]
    check: bool,
    /// Log walk progress at debug level.
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

    let root = resolve_source_root(cli.root.as_deref())?;
    let output = resolve_catalog_path(cli.output.as_deref());
    let report = build_catalog(&root)
        .with_context(|| format!("building catalog from {}", root.display()))?;

    if cli.check {
        return check_up_to_date(&output, &report.catalog);
    }

    write_catalog(&output, &report.catalog)?;
    info!(path = %output.display(), "catalog written");

    println!("catalog written to {}", output.display());
    print_summary(&report.catalog);
    if !report.warnings.is_empty() {
        println!("skipped branches: {}", report.warnings.len());
    }
    Ok(())
}

fn check_up_to_date(output: &Path, catalog: &Catalog) -> Result<()> {
    let fresh = encode(catalog)?;
    let existing = fs::read_to_string(output)
        .with_context(|| format!("reading existing catalog {}", output.display()))?;
    if existing != fresh {
        bail!(
            "{} is stale; rerun catalog-build without --check",
            output.display()
        );
    }
    println!("{} is up to date", output.display());
    Ok(())
}

fn print_summary(catalog: &Catalog) {
    let summary = catalog.summary();
    println!(
        "top-keys: {}, sub-keys: {}, leaves: {}",
        summary.top_keys, summary.sub_keys, summary.leaves
    );
    for (top_key, group) in catalog.iter() {
        println!(
            "  {top_key}: {} sub-keys, {} leaves",
            group.len(),
            group.leaf_count()
        );
    }
}
