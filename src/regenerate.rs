//! Snapshot regeneration.
//!
//! For each configured style, in order, the style's output tree is destroyed
//! and recreated, then the corpus is walked: every directory is mirrored and
//! every regular file that passes the include filter is handed to the
//! formatter together with its mapped output path.
//!
//! Runs are sequential. A filesystem failure aborts the run and leaves the
//! current style's tree partially populated.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::{FailurePolicy, RegenConfig};
use crate::discovery::{CorpusDiscoverer, CorpusEntry};
use crate::errors::{RegenError, Result};
use crate::formatter::{FormatRequest, Formatter};
use crate::report::{ReportLine, ReportSink};
use crate::style::Style;

// =============================================================================
// SUMMARIES
// =============================================================================

/// Counters for one style's regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSummary {
    pub style: Style,
    /// Directories mirrored, the output root included.
    pub directories: usize,
    /// Files handed to the formatter.
    pub formatted: usize,
    /// Files excluded by the include filter.
    pub filtered: usize,
    /// Formatter invocations that reported failure.
    pub failed: usize,
    /// Entries that are neither directories nor regular files.
    pub unsupported: usize,
}

impl StyleSummary {
    fn new(style: &Style) -> Self {
        Self {
            style: style.clone(),
            directories: 0,
            formatted: 0,
            filtered: 0,
            failed: 0,
            unsupported: 0,
        }
    }
}

/// Outcome of a complete run, one entry per style in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub styles: Vec<StyleSummary>,
}

impl RunSummary {
    pub fn formatted(&self) -> usize {
        self.styles.iter().map(|s| s.formatted).sum()
    }

    pub fn failed(&self) -> usize {
        self.styles.iter().map(|s| s.failed).sum()
    }
}

// =============================================================================
// REGENERATOR
// =============================================================================

/// Rebuilds every style's output tree from the corpus.
pub struct Regenerator<'a> {
    config: &'a RegenConfig,
    formatter: &'a dyn Formatter,
}

impl<'a> Regenerator<'a> {
    pub fn new(config: &'a RegenConfig, formatter: &'a dyn Formatter) -> Self {
        Self { config, formatter }
    }

    /// Regenerates all configured styles in order.
    pub fn run(&self, sink: &mut dyn ReportSink) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for style in &self.config.styles {
            summary.styles.push(self.regenerate_style(style, sink)?);
        }
        Ok(summary)
    }

    fn regenerate_style(&self, style: &Style, sink: &mut dyn ReportSink) -> Result<StyleSummary> {
        let layout = &self.config.layout;
        let output_root = layout.output_root(style);

        if resolves_to(&output_root, layout.source_root()) {
            return Err(RegenError::InvalidStyle {
                name: style.to_string(),
                reason: format!(
                    "'{}' resolves to the corpus root",
                    output_root.display()
                ),
            });
        }

        info!("[{style}] resetting {}", output_root.display());
        reset_tree(&output_root)?;

        info!("[{style}] walking {}", layout.source_root().display());
        let mut summary = StyleSummary::new(style);
        for entry in CorpusDiscoverer::discover(layout.source_root())? {
            match entry {
                CorpusEntry::Directory(dir) => {
                    let mirrored = layout.map_to_style(&dir, style)?;
                    fs::create_dir_all(&mirrored).map_err(|source| RegenError::CreateDir {
                        path: mirrored.clone(),
                        source,
                    })?;
                    summary.directories += 1;
                }
                CorpusEntry::File(source) => {
                    if !self.config.includes(&source) {
                        summary.filtered += 1;
                        continue;
                    }
                    self.format_file(style, &source, sink, &mut summary)?;
                }
                CorpusEntry::Unsupported(path) => {
                    warn!(
                        "[{style}] skipping unsupported entry {} (not a directory or regular file)",
                        layout.display_path(&path).display()
                    );
                    summary.unsupported += 1;
                }
            }
        }

        info!(
            "[{style}] {} formatted, {} filtered, {} failed, {} directories",
            summary.formatted, summary.filtered, summary.failed, summary.directories
        );
        Ok(summary)
    }

    fn format_file(
        &self,
        style: &Style,
        source: &Path,
        sink: &mut dyn ReportSink,
        summary: &mut StyleSummary,
    ) -> Result<()> {
        let layout = &self.config.layout;
        let output = layout.map_to_style(source, style)?;
        let outcome = self.formatter.format(&FormatRequest {
            style,
            source,
            output: &output,
        })?;

        summary.formatted += 1;
        sink.emit(&ReportLine {
            source: layout.display_path(source),
            output: layout.display_path(&output),
        });

        if outcome.success {
            return Ok(());
        }
        summary.failed += 1;
        let diagnostics = outcome.diagnostics.trim();
        match self.config.on_failure {
            FailurePolicy::Ignore => Ok(()),
            FailurePolicy::Warn => {
                warn!(
                    "[{style}] formatter failed on {} ({}){}{}",
                    layout.display_path(source).display(),
                    outcome
                        .status
                        .map_or_else(|| "signal".to_string(), |code| format!("exit status {code}")),
                    if diagnostics.is_empty() { "" } else { ": " },
                    diagnostics
                );
                Ok(())
            }
            FailurePolicy::Abort => Err(RegenError::FormatterFailed {
                source_path: layout.display_path(source),
                style: style.to_string(),
                status: outcome.status,
                diagnostics: (!diagnostics.is_empty()).then(|| diagnostics.to_string()),
            }),
        }
    }
}

/// Regenerates every style's output tree. See [`Regenerator`].
pub fn regenerate(
    config: &RegenConfig,
    formatter: &dyn Formatter,
    sink: &mut dyn ReportSink,
) -> Result<RunSummary> {
    Regenerator::new(config, formatter).run(sink)
}

/// Whether both paths exist and name the same directory after resolving links
/// and, on case-insensitive filesystems, case.
fn resolves_to(path: &Path, target: &Path) -> bool {
    match (fs::canonicalize(path), fs::canonicalize(target)) {
        (Ok(path), Ok(target)) => path == target,
        _ => false,
    }
}

/// Removes `path` recursively if it exists, then recreates it empty.
pub fn reset_tree(path: &Path) -> Result<()> {
    let reset_error = |source: std::io::Error| RegenError::Reset {
        path: path.to_path_buf(),
        source,
    };
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(reset_error(e)),
    }
    fs::create_dir_all(path).map_err(reset_error)
}
