//! Defines the command-line arguments for the snapregen CLI.
//!
//! Invoked with no flags, the tool behaves like the historical harness:
//! `snapregen [FILTER]` regenerates the `default` and `otbs` trees from
//! `test/source`.

use clap::Parser;
use std::path::PathBuf;

use crate::config::FailurePolicy;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "snapregen",
    version,
    about = "Regenerate per-style golden output trees by running the formatter over a corpus."
)]
pub struct RegenArgs {
    /// Only format source files whose full path contains this text.
    pub filter: Option<String>,

    /// Test-area root containing the corpus and the style trees.
    #[arg(long, value_name = "PATH")]
    pub test_dir: Option<PathBuf>,

    /// Name of the corpus directory inside the test area.
    #[arg(long, value_name = "NAME")]
    pub corpus: Option<String>,

    /// Style to regenerate; repeat to list several. Replaces the configured list.
    #[arg(long = "style", value_name = "NAME")]
    pub styles: Vec<String>,

    /// Working directory for formatter invocations [default: parent of the test directory].
    #[arg(long, value_name = "PATH")]
    pub project_dir: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when the formatter reports failure.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    /// Only verify that every source file has an output in every style tree.
    #[arg(long)]
    pub check: bool,

    /// Print the run summary as JSON instead of per-file lines.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_has_no_overrides() {
        let args = RegenArgs::try_parse_from(["snapregen"]).unwrap();
        assert_eq!(args.filter, None);
        assert!(args.styles.is_empty());
        assert!(!args.check);
    }

    #[test]
    fn positional_filter_and_repeated_styles() {
        let args = RegenArgs::try_parse_from([
            "snapregen",
            "shebang/",
            "--style",
            "otbs",
            "--style=compact",
            "--on-failure",
            "abort",
        ])
        .unwrap();
        assert_eq!(args.filter.as_deref(), Some("shebang/"));
        assert_eq!(args.styles, ["otbs", "compact"]);
        assert_eq!(args.on_failure, Some(FailurePolicy::Abort));
    }

    #[test]
    fn at_most_one_positional_argument() {
        assert!(RegenArgs::try_parse_from(["snapregen", "a", "b"]).is_err());
    }
}
