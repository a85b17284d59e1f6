// Catalog builder guard rails: ordering, filtering, determinism, round-trip.
mod support;

use anyhow::{Context, Result};
use cascade_catalog::{
    BranchWarning, Catalog, CatalogEntry, CatalogError, build_catalog, decode, encode,
    load_catalog_from_path, write_catalog,
};
use std::fs;
use support::SourceTree;

fn leaves(catalog: &Catalog, top: &str, sub: &str) -> Vec<String> {
    catalog
        .sub_group(top, sub)
        .map(|group| group.entries().iter().map(|e| e.0.clone()).collect())
        .unwrap_or_default()
}

fn sample_tree() -> Result<SourceTree> {
    let tree = SourceTree::new()?;
    tree.file("North/CityB/zeta.pdf")?;
    tree.file("North/CityB/alpha.pdf")?;
    tree.file("North/CityA/doc2.pdf")?;
    tree.file("North/CityA/doc1.pdf")?;
    tree.file("South/Port/manual.pdf")?;
    tree.dir("South/Harbour")?;
    tree.dir("West/Empty")?;
    tree.dir("East")?;
    Ok(tree)
}

#[test]
fn builds_sorted_nested_catalog() -> Result<()> {
    let tree = sample_tree()?;
    let report = build_catalog(tree.root())?;
    let catalog = &report.catalog;

    assert_eq!(catalog.top_keys().collect::<Vec<_>>(), vec!["North", "South"]);
    assert_eq!(
        catalog.get("North").unwrap().sub_keys().collect::<Vec<_>>(),
        vec!["CityA", "CityB"]
    );
    assert_eq!(leaves(catalog, "North", "CityA"), vec!["doc1.pdf", "doc2.pdf"]);
    assert_eq!(leaves(catalog, "North", "CityB"), vec!["alpha.pdf", "zeta.pdf"]);
    assert!(report.warnings.is_empty());
    Ok(())
}

#[test]
fn empty_groups_are_never_emitted() -> Result<()> {
    let tree = sample_tree()?;
    let catalog = build_catalog(tree.root())?.catalog;

    assert!(catalog.get("South").unwrap().get("Harbour").is_none());
    assert!(catalog.get("West").is_none());
    assert!(catalog.get("East").is_none());
    for (_, group) in catalog.iter() {
        assert!(!group.is_empty());
        for (_, sub) in group.iter() {
            assert!(!sub.is_empty());
        }
    }
    Ok(())
}

#[test]
fn empty_tree_builds_empty_catalog() -> Result<()> {
    let tree = SourceTree::new()?;
    let catalog = build_catalog(tree.root())?.catalog;
    assert!(catalog.is_empty());
    assert_eq!(encode(&catalog)?, "{}\n");
    Ok(())
}

#[test]
fn nested_directories_below_sub_keys_are_ignored() -> Result<()> {
    let tree = SourceTree::new()?;
    tree.file("North/CityA/doc1.pdf")?;
    tree.file("North/CityA/archive/old.pdf")?;
    tree.file("North/OnlyNested/deeper/file.pdf")?;

    let catalog = build_catalog(tree.root())?.catalog;
    assert_eq!(leaves(&catalog, "North", "CityA"), vec!["doc1.pdf"]);
    assert!(catalog.sub_group("North", "OnlyNested").is_none());
    Ok(())
}

#[test]
fn names_are_taken_verbatim() -> Result<()> {
    let tree = SourceTree::new()?;
    tree.file("Castilla y León/Ávila/Criterios Honorarios.pdf")?;
    tree.file("Castilla y León/avila/.hidden")?;

    let catalog = build_catalog(tree.root())?.catalog;
    let group = catalog.get("Castilla y León").unwrap();
    assert_eq!(group.sub_keys().collect::<Vec<_>>(), vec!["avila", "Ávila"]);
    assert_eq!(
        catalog.sub_group("Castilla y León", "avila").unwrap().entries(),
        &[CatalogEntry::from(".hidden")]
    );
    Ok(())
}

#[test]
fn rebuilding_unchanged_tree_is_byte_identical() -> Result<()> {
    let tree = sample_tree()?;
    let out = tempfile::TempDir::new()?;
    let first = out.path().join("first.json");
    let second = out.path().join("second.json");

    write_catalog(&first, &build_catalog(tree.root())?.catalog)?;
    write_catalog(&second, &build_catalog(tree.root())?.catalog)?;
    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}

#[test]
fn artifact_round_trips() -> Result<()> {
    let tree = sample_tree()?;
    let catalog = build_catalog(tree.root())?.catalog;
    let decoded = decode(&encode(&catalog)?)?;
    assert_eq!(decoded, catalog);

    let out = tempfile::TempDir::new()?;
    let path = out.path().join("catalog.json");
    write_catalog(&path, &catalog)?;
    assert_eq!(load_catalog_from_path(&path)?, catalog);
    Ok(())
}

#[test]
fn missing_root_fails_without_writing() -> Result<()> {
    let out = tempfile::TempDir::new()?;
    let err = build_catalog(&out.path().join("missing")).unwrap_err();
    assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn unreadable_branch_is_skipped_with_warning() -> Result<()> {
    if support::running_as_root() {
        eprintln!("skipping: permission bits do not apply to root");
        return Ok(());
    }
    let tree = SourceTree::new()?;
    tree.file("North/CityA/doc1.pdf")?;
    tree.file("North/Locked/secret.pdf")?;
    tree.file("North/Sealed/listed.pdf")?;
    tree.file("South/Port/manual.pdf")?;
    let locked = tree.root().join("North/Locked");
    // Listable but not searchable: names come back, metadata does not.
    let sealed = tree.root().join("North/Sealed");
    let locked_top = tree.root().join("South");
    support::set_mode(&locked, 0o000)?;
    support::set_mode(&sealed, 0o444)?;
    support::set_mode(&locked_top, 0o000)?;

    let result = build_catalog(tree.root());
    support::set_mode(&locked, 0o755)?;
    support::set_mode(&sealed, 0o755)?;
    support::set_mode(&locked_top, 0o755)?;
    let report = result?;

    assert_eq!(report.catalog.top_keys().collect::<Vec<_>>(), vec!["North"]);
    let north = report.catalog.get("North").context("North kept")?;
    assert_eq!(north.sub_keys().collect::<Vec<_>>(), vec!["CityA"]);
    assert_eq!(leaves(&report.catalog, "North", "CityA"), vec!["doc1.pdf"]);
    let skipped: Vec<_> = report
        .warnings
        .iter()
        .map(|warning| {
            assert!(matches!(warning, BranchWarning::BranchUnreadable { .. }));
            warning.path().clone()
        })
        .collect();
    assert_eq!(skipped, vec![locked, sealed, locked_top]);
    Ok(())
}
