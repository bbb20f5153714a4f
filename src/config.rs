//! Run configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line overrides. [`RegenSettings::resolve`] validates the merged
//! values and produces the immutable [`RegenConfig`] every operation takes.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::errors::{RegenError, Result};
use crate::layout::TreeLayout;
use crate::style::{default_styles, Style};

pub const DEFAULT_TEST_DIR: &str = "test";
pub const DEFAULT_CORPUS: &str = "source";

// ============================================================================
// POLICY AND FORMATTER COMMAND
// ============================================================================

/// What to do when the formatter runs but reports failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Treat failure exactly like success.
    Ignore,
    /// Log the failure with the formatter's diagnostics and continue.
    #[default]
    Warn,
    /// Stop the whole run.
    Abort,
}

/// Program and leading arguments used to invoke the formatter. The style,
/// source and output arguments are appended per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl FormatterCommand {
    pub fn from_argv(argv: Vec<String>) -> Result<Self> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or_else(|| RegenError::Config {
                message: "formatter command is empty".to_string(),
                help: Some("set `formatter` to e.g. [cargo, run, --]".to_string()),
            })?;
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }
}

impl Default for FormatterCommand {
    /// Builds and runs the formatter from the project root.
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            args: vec!["run".to_string(), "--".to_string()],
        }
    }
}

// ============================================================================
// CONFIGURATION FILE
// ============================================================================

/// Contents of a YAML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub styles: Option<Vec<String>>,
    pub test_dir: Option<PathBuf>,
    pub corpus: Option<String>,
    pub project_dir: Option<PathBuf>,
    pub formatter: Option<Vec<String>>,
    pub on_failure: Option<FailurePolicy>,
}

impl ConfigFile {
    /// Reads a configuration file. Relative paths inside it are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| RegenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&data).map_err(|source| RegenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(file.rebase(base))
    }

    pub fn parse(data: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null; treat it as "no keys".
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(data)
    }

    fn rebase(mut self, base: &Path) -> Self {
        self.test_dir = self.test_dir.map(|dir| base.join(dir));
        self.project_dir = self.project_dir.map(|dir| base.join(dir));
        self
    }
}

// ============================================================================
// SETTINGS AND RESOLVED CONFIGURATION
// ============================================================================

/// Unvalidated, mergeable settings.
#[derive(Debug, Clone)]
pub struct RegenSettings {
    pub styles: Vec<String>,
    pub test_dir: PathBuf,
    pub corpus: String,
    pub project_dir: Option<PathBuf>,
    pub formatter: Vec<String>,
    pub filter: Option<String>,
    pub on_failure: FailurePolicy,
}

impl Default for RegenSettings {
    fn default() -> Self {
        let formatter = FormatterCommand::default();
        Self {
            styles: default_styles().iter().map(Style::to_string).collect(),
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            corpus: DEFAULT_CORPUS.to_string(),
            project_dir: None,
            formatter: std::iter::once(formatter.program)
                .chain(formatter.args)
                .collect(),
            filter: None,
            on_failure: FailurePolicy::default(),
        }
    }
}

impl RegenSettings {
    /// Overlays every key present in `file`.
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(styles) = file.styles {
            self.styles = styles;
        }
        if let Some(test_dir) = file.test_dir {
            self.test_dir = test_dir;
        }
        if let Some(corpus) = file.corpus {
            self.corpus = corpus;
        }
        if let Some(project_dir) = file.project_dir {
            self.project_dir = Some(project_dir);
        }
        if let Some(formatter) = file.formatter {
            self.formatter = formatter;
        }
        if let Some(on_failure) = file.on_failure {
            self.on_failure = on_failure;
        }
    }

    /// Validates the settings against the filesystem.
    ///
    /// The test-area root is canonicalized so that paths handed to the
    /// formatter stay valid from the project root working directory.
    pub fn resolve(self) -> Result<RegenConfig> {
        if self.styles.is_empty() {
            return Err(RegenError::config("no styles configured"));
        }

        let corpus = Style::new(self.corpus.clone()).map_err(|_| RegenError::Config {
            message: format!("invalid corpus name '{}'", self.corpus),
            help: Some("the corpus is a single directory inside the test area".to_string()),
        })?;

        let mut styles: Vec<Style> = Vec::with_capacity(self.styles.len());
        for name in self.styles {
            let style = Style::new(name)?;
            // Case-insensitive filesystems resolve `Source` to `source`.
            if style.as_str().eq_ignore_ascii_case(corpus.as_str()) {
                return Err(RegenError::InvalidStyle {
                    name: style.to_string(),
                    reason: "style would overwrite the corpus root".to_string(),
                });
            }
            if styles
                .iter()
                .any(|seen| seen.as_str().eq_ignore_ascii_case(style.as_str()))
            {
                return Err(RegenError::InvalidStyle {
                    name: style.to_string(),
                    reason: "style listed more than once".to_string(),
                });
            }
            styles.push(style);
        }

        let test_root = self
            .test_dir
            .canonicalize()
            .map_err(|source| RegenError::TestRoot {
                path: self.test_dir.clone(),
                source,
            })?;
        let layout = TreeLayout::new(test_root, corpus.as_str());
        if !layout.source_root().is_dir() {
            return Err(RegenError::MissingCorpus {
                path: layout.source_root().to_path_buf(),
            });
        }

        let project_root = match self.project_dir {
            Some(dir) => dir.canonicalize().map_err(|source| RegenError::Config {
                message: format!("project directory '{}' is not accessible: {source}", dir.display()),
                help: Some("pass --project-dir".to_string()),
            })?,
            None => layout
                .test_root()
                .parent()
                .unwrap_or_else(|| layout.test_root())
                .to_path_buf(),
        };

        Ok(RegenConfig {
            styles,
            layout,
            project_root,
            formatter: FormatterCommand::from_argv(self.formatter)?,
            filter: self.filter.filter(|filter| !filter.is_empty()),
            on_failure: self.on_failure,
        })
    }
}

/// Validated configuration for one run. Built once, passed explicitly.
#[derive(Debug, Clone)]
pub struct RegenConfig {
    pub styles: Vec<Style>,
    pub layout: TreeLayout,
    /// Working directory of every formatter invocation.
    pub project_root: PathBuf,
    pub formatter: FormatterCommand,
    /// Include filter; `None` means every file is formatted.
    pub filter: Option<String>,
    pub on_failure: FailurePolicy,
}

impl RegenConfig {
    /// Whether a source file passes the include filter. The filter is matched
    /// against the full source path, which lives under the canonicalized test
    /// root, so ancestor segments such as `test/source/sub` match too.
    pub fn includes(&self, source_path: &Path) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => source_path.to_string_lossy().contains(filter.as_str()),
        }
    }
}
