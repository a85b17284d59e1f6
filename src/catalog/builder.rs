//! Directory walk that turns `root/<top>/<sub>/<file>` into a [`Catalog`].
//!
//! The walk is strictly two levels deep. Entries are classified after
//! following symlinks, sorted by name at every level, and converted to UTF-8
//! verbatim. Only the root itself is fatal; any directory below it that
//! cannot be listed is skipped and reported through [`BuildReport::warnings`].

use crate::catalog::{Catalog, CatalogEntry, SubGroup, TopGroup};
use crate::error::{BranchWarning, CatalogError, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Output of a single build: the catalog plus every branch that was skipped.
#[derive(Debug)]
pub struct BuildReport {
    pub catalog: Catalog,
    pub warnings: Vec<BranchWarning>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
    Other,
}

struct DirItem {
    name: OsString,
    path: PathBuf,
    kind: EntryKind,
}

/// Walk `root` and build the catalog.
///
/// Fails with [`CatalogError::SourceUnavailable`] when the root is missing,
/// unreadable, or not a directory. Every other listing failure, including a
/// directory whose entries cannot be inspected, is recorded as a
/// [`BranchWarning`] and the walk moves on.
pub fn build_catalog(root: &Path) -> Result<BuildReport> {
    let source_unavailable = |source: io::Error| CatalogError::SourceUnavailable {
        path: root.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(root).map_err(source_unavailable)?;
    if !metadata.is_dir() {
        return Err(source_unavailable(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }
    let tops = list_sorted(root).map_err(source_unavailable)?;

    let mut catalog = Catalog::default();
    let mut warnings = Vec::new();

    for top in tops.into_iter().filter(|item| item.kind == EntryKind::Directory) {
        let Some(top_key) = utf8_name(&top, &mut warnings) else {
            continue;
        };
        let subs = match list_sorted(&top.path) {
            Ok(subs) => subs,
            Err(source) => {
                record_unreadable(&mut warnings, top.path, source);
                continue;
            }
        };

        let mut group = TopGroup::default();
        for sub in subs.into_iter().filter(|item| item.kind == EntryKind::Directory) {
            let Some(sub_key) = utf8_name(&sub, &mut warnings) else {
                continue;
            };
            let leaves = match list_sorted(&sub.path) {
                Ok(leaves) => leaves,
                Err(source) => {
                    record_unreadable(&mut warnings, sub.path, source);
                    continue;
                }
            };

            let entries: Vec<CatalogEntry> = leaves
                .into_iter()
                .filter(|item| item.kind == EntryKind::File)
                .filter_map(|item| utf8_name(&item, &mut warnings))
                .map(CatalogEntry)
                .collect();

            match SubGroup::from_entries(entries) {
                Some(leaves) => {
                    debug!(
                        top = %top_key,
                        sub = %sub_key,
                        leaves = leaves.len(),
                        "catalogued sub-key"
                    );
                    group.insert(sub_key, leaves);
                }
                None => debug!(top = %top_key, sub = %sub_key, "sub-key has no files; omitted"),
            }
        }

        if !catalog.insert(top_key.clone(), group) {
            debug!(top = %top_key, "top-key has no populated sub-keys; omitted");
        }
    }

    Ok(BuildReport { catalog, warnings })
}

fn list_sorted(dir: &Path) -> io::Result<Vec<DirItem>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follow symlinks; dangling links classify as `Other` and are ignored.
        // Any other metadata failure makes the whole listing unreadable.
        let kind = match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => EntryKind::Other,
            Err(err) if err.kind() == io::ErrorKind::NotFound => EntryKind::Other,
            Err(err) => return Err(err),
        };
        items.push(DirItem {
            name: entry.file_name(),
            path,
            kind,
        });
    }
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

fn utf8_name(item: &DirItem, warnings: &mut Vec<BranchWarning>) -> Option<String> {
    match item.name.clone().into_string() {
        Ok(name) => Some(name),
        Err(_) => {
            let warning = BranchWarning::NonUtf8Name {
                path: item.path.clone(),
            };
            warn!("{warning}");
            warnings.push(warning);
            None
        }
    }
}

fn record_unreadable(warnings: &mut Vec<BranchWarning>, path: PathBuf, source: io::Error) {
    let warning = BranchWarning::BranchUnreadable { path, source };
    warn!("{warning}");
    warnings.push(warning);
}
