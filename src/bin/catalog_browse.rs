//! Interactive cascading selector over a catalog artifact.
//!
//! Loads the artifact once, opens one selector session over it, and reads
//! commands from stdin (see `help`). Documents are fetched from the store
//! directory and saved into the download directory under their leaf name.

use anyhow::{Context, Result};
use cascade_catalog::config::{resolve_catalog_path, resolve_store_root};
use cascade_catalog::console::Console;
use cascade_catalog::{FsStore, Selector, load_catalog_from_path, logging};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-browse")]
#[command(about = "Narrow from top-key to sub-key to document and save it")]
struct Cli {
    /// Artifact path (or set CASCADE_CATALOG_PATH; defaults to catalog.json).
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Directory documents are read from (or set CASCADE_STORE_ROOT).
    #[arg(long)]
    store: Option<PathBuf>,
    /// Directory selected documents are saved into.
    #[arg(long, default_value = ".")]
    download_dir: PathBuf,
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

    let catalog_path = resolve_catalog_path(cli.catalog.as_deref());
    let store_root = resolve_store_root(cli.store.as_deref())?;
    let catalog = load_catalog_from_path(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    info!(
        catalog = %catalog_path.display(),
        store = %store_root.display(),
        "starting session"
    );

    let selector = Selector::new(Arc::new(catalog), FsStore::new(store_root));
    let mut console = Console::new(selector, cli.download_dir);
    let stdin = io::stdin();
    console
        .run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr().lock())
        .context("console session failed")
}
