//! Per-file report lines and the sinks that receive them.

use std::fmt;
use std::path::PathBuf;

/// Column width the source and output paths are padded to.
pub const REPORT_COLUMN_WIDTH: usize = 30;

/// One processed file. Both paths are relative to the test-area root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl ReportLine {
    pub const VERB: &'static str = "formatted";

    /// The line without its leading verb.
    pub fn paths(&self) -> String {
        format!(
            "{:<width$} to {:<width$}",
            self.source.display().to_string(),
            self.output.display().to_string(),
            width = REPORT_COLUMN_WIDTH
        )
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::VERB, self.paths())
    }
}

/// Receives report lines in processing order.
pub trait ReportSink {
    fn emit(&mut self, line: &ReportLine);
}

/// Collects report lines for tests or programmatic capture.
#[derive(Debug, Default)]
pub struct ReportBuffer {
    pub lines: Vec<ReportLine>,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered lines, one per processed file.
    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(ReportLine::to_string).collect()
    }
}

impl ReportSink for ReportBuffer {
    fn emit(&mut self, line: &ReportLine) {
        self.lines.push(line.clone());
    }
}

/// Discards every line.
#[derive(Debug, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn emit(&mut self, _line: &ReportLine) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_left_justified_to_a_fixed_width() {
        let line = ReportLine {
            source: PathBuf::from("source/sub/b.txt"),
            output: PathBuf::from("otbs/sub/b.txt"),
        };
        let rendered = line.to_string();
        assert_eq!(
            rendered,
            format!("formatted {:<30} to {:<30}", "source/sub/b.txt", "otbs/sub/b.txt")
        );
        assert_eq!(rendered.len(), "formatted ".len() + 30 + " to ".len() + 30);
    }

    #[test]
    fn long_paths_are_not_truncated() {
        let long = "source/".to_string() + &"x".repeat(40);
        let line = ReportLine {
            source: PathBuf::from(&long),
            output: PathBuf::from("default/x"),
        };
        assert!(line.to_string().contains(&long));
    }
}
