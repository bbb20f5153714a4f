//! The snapregen command-line interface.
//!
//! Merges defaults, the optional configuration file and command-line flags
//! into a [`RegenConfig`], then either regenerates the style trees or audits
//! them with `--check`.

use std::process;

use clap::Parser;
use log::info;

use crate::check::check_mirror;
use crate::cli::args::RegenArgs;
use crate::config::{ConfigFile, RegenConfig, RegenSettings};
use crate::errors::Result;
use crate::formatter::CommandFormatter;
use crate::regenerate::regenerate;
use crate::report::NullSink;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = RegenArgs::parse();

    match execute(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    }
}

/// Runs the command described by `args`. Returns `false` when `--check`
/// finds missing outputs.
pub fn execute(args: RegenArgs) -> Result<bool> {
    let choice = output::color_choice(args.no_color);
    let check = args.check;
    let json = args.json;
    let config = resolve_config(args)?;

    if check {
        let report = check_mirror(&config)?;
        if json {
            output::print_json(&report)?;
        } else {
            output::print_mirror_report(&report, choice);
        }
        return Ok(report.is_complete());
    }

    let mut formatter = CommandFormatter::new(config.formatter.clone(), &config.project_root);
    if json {
        formatter = formatter.silence_stdout();
    }
    let summary = if json {
        let summary = regenerate(&config, &formatter, &mut NullSink)?;
        output::print_json(&summary)?;
        summary
    } else {
        regenerate(&config, &formatter, &mut output::StdoutReport::new(choice))?
    };
    info!(
        "regenerated {} style(s): {} file(s) formatted, {} failed",
        summary.styles.len(),
        summary.formatted(),
        summary.failed()
    );
    Ok(true)
}

/// Layers defaults, the configuration file and flags, then validates.
pub fn resolve_config(args: RegenArgs) -> Result<RegenConfig> {
    let mut settings = RegenSettings::default();
    if let Some(path) = &args.config {
        settings.merge(ConfigFile::load(path)?);
    }

    if let Some(test_dir) = args.test_dir {
        settings.test_dir = test_dir;
    }
    if let Some(corpus) = args.corpus {
        settings.corpus = corpus;
    }
    if !args.styles.is_empty() {
        settings.styles = args.styles;
    }
    if let Some(project_dir) = args.project_dir {
        settings.project_dir = Some(project_dir);
    }
    if let Some(on_failure) = args.on_failure {
        settings.on_failure = on_failure;
    }
    settings.filter = args.filter;

    settings.resolve()
}
