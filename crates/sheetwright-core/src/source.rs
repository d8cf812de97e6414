//! External document sources for sheet imports

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Identifies an external spreadsheet document that imported sheets are
/// cloned from.
///
/// Sources are read-only: the renderer never mutates a caller-supplied
/// document. Streams are drained into memory up front so the composition
/// layer can key its identity cache on stable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    /// A document on disk
    Path(PathBuf),
    /// An in-memory document
    Bytes(Vec<u8>),
}

impl SheetSource {
    /// Build a source from an open byte stream by reading it to the end.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(SheetSource::Bytes(buf))
    }
}

impl From<PathBuf> for SheetSource {
    fn from(path: PathBuf) -> Self {
        SheetSource::Path(path)
    }
}

impl From<&Path> for SheetSource {
    fn from(path: &Path) -> Self {
        SheetSource::Path(path.to_path_buf())
    }
}

impl From<&str> for SheetSource {
    fn from(path: &str) -> Self {
        SheetSource::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for SheetSource {
    fn from(bytes: Vec<u8>) -> Self {
        SheetSource::Bytes(bytes)
    }
}
