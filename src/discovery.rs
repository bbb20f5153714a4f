use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{RegenError, Result};

/// One entry of the corpus, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusEntry {
    /// A directory, including the corpus root itself.
    Directory(PathBuf),
    /// A regular file.
    File(PathBuf),
    /// Anything else: symbolic links (never followed), sockets, fifos.
    Unsupported(PathBuf),
}

/// Discovers the entries of a source corpus.
#[derive(Debug)]
pub struct CorpusDiscoverer;

impl CorpusDiscoverer {
    /// Recursively lists every entry under `root`, starting with `root` itself.
    ///
    /// Entries are sorted by file name within each directory and every
    /// directory is listed before its contents, so a consumer that creates
    /// directories as it goes never writes into a missing parent.
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<CorpusEntry>> {
        let root = root.as_ref();
        let mut entries = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| RegenError::Walk {
                path: source.path().unwrap_or(root).to_path_buf(),
                source,
            })?;

            let file_type = entry.file_type();
            let path = entry.into_path();
            let entry = if file_type.is_dir() {
                CorpusEntry::Directory(path)
            } else if file_type.is_file() {
                CorpusEntry::File(path)
            } else {
                CorpusEntry::Unsupported(path)
            };
            entries.push(entry);
        }
        Ok(entries)
    }
}
