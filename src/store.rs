//! Retrieval seam between the selector and wherever documents live.
//!
//! The selector only knows `(top, sub, leaf)` triples. A [`DocumentStore`]
//! turns one into a byte stream; [`FsStore`] is the filesystem-backed
//! implementation used by the console driver.

use crate::error::RetrievalError;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

/// Fully qualified leaf address, rendered as `<top>/<sub>/<leaf>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    pub top: String,
    pub sub: String,
    pub leaf: String,
}

impl DocumentPath {
    pub fn new(top: impl Into<String>, sub: impl Into<String>, leaf: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            sub: sub.into(),
            leaf: leaf.into(),
        }
    }

    /// Relative filesystem path, refusing any component that would not stay
    /// a single directory level.
    pub fn relative_path(&self) -> Result<PathBuf, RetrievalError> {
        let mut relative = PathBuf::new();
        for component in [&self.top, &self.sub, &self.leaf] {
            if !is_plain_component(component) {
                return Err(RetrievalError::InvalidPath {
                    path: self.to_string(),
                    component: component.clone(),
                });
            }
            relative.push(component);
        }
        Ok(relative)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.top, self.sub, self.leaf)
    }
}

fn is_plain_component(raw: &str) -> bool {
    if raw.is_empty() || raw.contains('/') {
        return false;
    }
    #[cfg(windows)]
    if raw.contains('\\') {
        return false;
    }
    let mut components = Path::new(raw).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// An opened document handed back to the caller of a leaf selection.
pub struct Document {
    path: DocumentPath,
    reader: Box<dyn Read + Send>,
}

impl Document {
    pub fn new(path: DocumentPath, reader: Box<dyn Read + Send>) -> Self {
        Self { path, reader }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }

    /// Drain the stream, mapping read errors to [`RetrievalError::Io`].
    pub fn read_to_vec(mut self) -> Result<Vec<u8>, RetrievalError> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|source| RetrievalError::Io {
                path: self.path.to_string(),
                source,
            })?;
        Ok(bytes)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").field("path", &self.path).finish()
    }
}

/// External store keyed by [`DocumentPath`].
pub trait DocumentStore {
    fn open(&self, path: &DocumentPath) -> Result<Document, RetrievalError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn open(&self, path: &DocumentPath) -> Result<Document, RetrievalError> {
        (**self).open(path)
    }
}

/// Store that resolves documents beneath a base directory.
#[derive(Clone, Debug)]
pub struct FsStore {
    base: PathBuf,
}

impl FsStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DocumentStore for FsStore {
    fn open(&self, path: &DocumentPath) -> Result<Document, RetrievalError> {
        let full = self.base.join(path.relative_path()?);
        match File::open(&full) {
            Ok(file) => Ok(Document::new(path.clone(), Box::new(file))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(RetrievalError::NotFound {
                path: path.to_string(),
            }),
            Err(source) => Err(RetrievalError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn display_joins_with_slashes() {
        let path = DocumentPath::new("North", "CityA", "doc1.pdf");
        assert_eq!(path.to_string(), "North/CityA/doc1.pdf");
    }

    #[test]
    fn relative_path_rejects_traversal() {
        for bad in ["..", ".", "", "a/b", "a/"] {
            let path = DocumentPath::new("North", bad, "doc.pdf");
            assert!(
                matches!(path.relative_path(), Err(RetrievalError::InvalidPath { .. })),
                "{bad:?} should be rejected"
            );
        }
        let ok = DocumentPath::new("North", "Santa Cruz de Tenerife", "criterios.pdf");
        assert_eq!(
            ok.relative_path().unwrap(),
            PathBuf::from("North/Santa Cruz de Tenerife/criterios.pdf")
        );
    }

    #[cfg(unix)]
    #[test]
    fn backslash_is_an_ordinary_character_on_unix() {
        let path = DocumentPath::new("North", "CityA", "a\\b.pdf");
        assert_eq!(
            path.relative_path().unwrap(),
            PathBuf::from("North/CityA/a\\b.pdf")
        );
    }

    #[cfg(windows)]
    #[test]
    fn backslash_is_a_separator_on_windows() {
        let path = DocumentPath::new("North", "a\\b", "doc.pdf");
        assert!(matches!(
            path.relative_path(),
            Err(RetrievalError::InvalidPath { .. })
        ));
    }

    #[test]
    fn fs_store_reads_and_reports_missing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("North/CityA")).unwrap();
        fs::write(temp.path().join("North/CityA/doc1.pdf"), b"contents").unwrap();
        let store = FsStore::new(temp.path());

        let doc = store
            .open(&DocumentPath::new("North", "CityA", "doc1.pdf"))
            .unwrap();
        assert_eq!(doc.read_to_vec().unwrap(), b"contents");

        let missing = store.open(&DocumentPath::new("North", "CityA", "gone.pdf"));
        assert!(matches!(missing, Err(RetrievalError::NotFound { .. })));
    }
}
