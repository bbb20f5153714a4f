//! Handles all user-facing output for the CLI.
//!
//! Report lines go to stdout, colorized when stdout is a terminal. Fatal
//! errors are rendered by `miette` on stderr from `cli::run`.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::check::MirrorReport;
use crate::report::{ReportLine, ReportSink};

/// Chooses the color mode for stdout.
pub fn color_choice(no_color: bool) -> ColorChoice {
    if no_color || !atty::is(atty::Stream::Stdout) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// StdoutReport: writes report lines to stdout as they are produced.
pub struct StdoutReport {
    stdout: StandardStream,
}

impl StdoutReport {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }
}

impl ReportSink for StdoutReport {
    fn emit(&mut self, line: &ReportLine) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        let _ = write!(self.stdout, "{}", ReportLine::VERB);
        let _ = self.stdout.reset();
        let _ = writeln!(self.stdout, " {}", line.paths());
    }
}

/// Prints the result of `--check`: missing outputs in red, then a verdict.
pub fn print_mirror_report(report: &MirrorReport, choice: ColorChoice) {
    let mut stdout = StandardStream::stdout(choice);
    for path in &report.missing {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = write!(stdout, "missing");
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {}", path.display());
    }

    let (color, verdict) = if report.is_complete() {
        (Color::Green, "complete")
    } else {
        (Color::Red, "incomplete")
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{verdict}");
    let _ = stdout.reset();
    let _ = writeln!(
        stdout,
        ": {} checked, {} missing",
        report.checked,
        report.missing.len()
    );
}

/// Prints any serializable result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

