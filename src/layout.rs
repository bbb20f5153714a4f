//! Filesystem layout of the test area.
//!
//! ```text
//! <test_root>/
//!   source/      corpus, read-only
//!   default/     output tree for style "default"
//!   otbs/        output tree for style "otbs"
//! ```
//!
//! Mapping from a corpus path to an output path is done by re-rooting the path
//! relative to the corpus root, never by string substitution, so a corpus name
//! that recurs deeper in a path (`source/source.typ`) maps correctly.

use std::path::{Path, PathBuf};

use crate::errors::{RegenError, Result};
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLayout {
    test_root: PathBuf,
    corpus: String,
    source_root: PathBuf,
}

impl TreeLayout {
    pub fn new(test_root: impl Into<PathBuf>, corpus: impl Into<String>) -> Self {
        let test_root = test_root.into();
        let corpus = corpus.into();
        let source_root = test_root.join(&corpus);
        Self {
            test_root,
            corpus,
            source_root,
        }
    }

    pub fn test_root(&self) -> &Path {
        &self.test_root
    }

    /// Name of the corpus root directory, e.g. `source`.
    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Root of the output tree owned by `style`, a sibling of the corpus root.
    pub fn output_root(&self, style: &Style) -> PathBuf {
        self.test_root.join(style)
    }

    /// Path of `source_path` relative to the corpus root.
    pub fn relative<'p>(&self, source_path: &'p Path) -> Result<&'p Path> {
        source_path
            .strip_prefix(&self.source_root)
            .map_err(|_| RegenError::OutsideCorpus {
                path: source_path.to_path_buf(),
                root: self.source_root.clone(),
            })
    }

    /// Maps a corpus path onto the structurally corresponding path in the
    /// output tree of `style`.
    pub fn map_to_style(&self, source_path: &Path, style: &Style) -> Result<PathBuf> {
        let relative = self.relative(source_path)?;
        let mut mapped = self.output_root(style);
        if !relative.as_os_str().is_empty() {
            mapped.push(relative);
        }
        Ok(mapped)
    }

    /// Shortens `path` for display by stripping the test-area root. Paths
    /// outside the test area are returned unchanged.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.test_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
