//! Snapregen error handling.
//!
//! Every fallible operation in the crate returns [`RegenError`]. Variants carry
//! the path or style they concern so the binary can render a useful `miette`
//! report without any extra context.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = RegenError> = std::result::Result<T, E>;

#[derive(Error, Diagnostic, Debug)]
pub enum RegenError {
    // ========================================================================
    // CONFIGURATION
    // ========================================================================
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(snapregen::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("failed to read configuration file '{}'", .path.display())]
    #[diagnostic(code(snapregen::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration file '{}'", .path.display())]
    #[diagnostic(
        code(snapregen::config::parse),
        help("expected YAML with keys: styles, test_dir, corpus, project_dir, formatter, on_failure")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid style name '{name}': {reason}")]
    #[diagnostic(
        code(snapregen::style),
        help("a style is used as a directory name next to the corpus")
    )]
    InvalidStyle { name: String, reason: String },

    #[error("test directory '{}' is not accessible", .path.display())]
    #[diagnostic(code(snapregen::layout::test_root), help("pass --test-dir"))]
    TestRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus root '{}' does not exist or is not a directory", .path.display())]
    #[diagnostic(code(snapregen::layout::corpus), help("pass --corpus"))]
    MissingCorpus { path: PathBuf },

    // ========================================================================
    // FILESYSTEM
    // ========================================================================
    #[error("failed to reset output tree '{}'", .path.display())]
    #[diagnostic(code(snapregen::reset))]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory '{}'", .path.display())]
    #[diagnostic(code(snapregen::mirror))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk corpus at '{}'", .path.display())]
    #[diagnostic(code(snapregen::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("'{}' is not inside the corpus root '{}'", .path.display(), .root.display())]
    #[diagnostic(code(snapregen::layout::outside))]
    OutsideCorpus { path: PathBuf, root: PathBuf },

    // ========================================================================
    // FORMATTER
    // ========================================================================
    #[error("failed to start formatter '{program}'")]
    #[diagnostic(
        code(snapregen::formatter::spawn),
        help("check the `formatter` entry of the configuration")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter failed on '{}' for style '{style}' ({})", .source_path.display(), describe_status(.status))]
    #[diagnostic(code(snapregen::formatter::failed))]
    FormatterFailed {
        source_path: PathBuf,
        style: String,
        status: Option<i32>,
        #[help]
        diagnostics: Option<String>,
    },

    // ========================================================================
    // OUTPUT
    // ========================================================================
    #[error("failed to serialize summary")]
    #[diagnostic(code(snapregen::output))]
    Json(#[from] serde_json::Error),
}

impl RegenError {
    /// Builds a [`RegenError::Config`] without help text.
    pub fn config(message: impl Into<String>) -> Self {
        RegenError::Config {
            message: message.into(),
            help: None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use miette::Report;

    use super::*;

    #[test]
    fn formatter_failure_renders_diagnostics_as_help() {
        let err = RegenError::FormatterFailed {
            source_path: PathBuf::from("source/a.typ"),
            style: "otbs".to_string(),
            status: Some(2),
            diagnostics: Some("unexpected token".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "formatter failed on 'source/a.typ' for style 'otbs' (exit status 2)"
        );
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("unexpected token"));
    }

    #[test]
    fn signal_termination_is_described() {
        assert_eq!(describe_status(&None), "terminated by signal");
    }
}
