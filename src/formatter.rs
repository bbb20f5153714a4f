//! The external formatter, seen only through its command-line contract:
//!
//! ```text
//! <program> <leading args...> --style=<style> <source> --output=<output>
//! ```
//!
//! The formatter reads `<source>`, applies the named style and writes the
//! result to `<output>`. Its exit status and standard error are captured in a
//! [`FormatOutcome`]; deciding what a failure means is left to the caller.
//! Standard output is passed through to ours unless it has been silenced.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::config::FormatterCommand;
use crate::errors::{RegenError, Result};
use crate::style::Style;

/// A single formatting job.
#[derive(Debug, Clone, Copy)]
pub struct FormatRequest<'a> {
    pub style: &'a Style,
    pub source: &'a Path,
    pub output: &'a Path,
}

/// Result of one formatter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub success: bool,
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard error.
    pub diagnostics: String,
}

impl FormatOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            status: Some(0),
            diagnostics: String::new(),
        }
    }

    pub fn failed(status: Option<i32>, diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Something that can produce the formatted output for a request.
///
/// `Err` is reserved for problems that make the whole run meaningless, such
/// as a formatter that cannot be started. A formatter that runs and fails
/// reports it through [`FormatOutcome::success`].
pub trait Formatter {
    fn format(&self, request: &FormatRequest<'_>) -> Result<FormatOutcome>;
}

impl<F> Formatter for F
where
    F: Fn(&FormatRequest<'_>) -> Result<FormatOutcome>,
{
    fn format(&self, request: &FormatRequest<'_>) -> Result<FormatOutcome> {
        self(request)
    }
}

/// Runs the formatter as a child process, one blocking invocation at a time.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    command: FormatterCommand,
    working_dir: PathBuf,
    forward_stdout: bool,
}

impl CommandFormatter {
    pub fn new(command: FormatterCommand, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
            forward_stdout: true,
        }
    }

    /// Discards the formatter's standard output instead of inheriting it.
    /// Used when our own stdout carries machine-readable output.
    pub fn silence_stdout(mut self) -> Self {
        self.forward_stdout = false;
        self
    }

    /// Full argument list for `request`, leading arguments included.
    pub fn arguments(&self, request: &FormatRequest<'_>) -> Vec<OsString> {
        let mut output = OsString::from("--output=");
        output.push(request.output);

        let mut args: Vec<OsString> = self.command.args.iter().map(OsString::from).collect();
        args.push(OsString::from(format!("--style={}", request.style)));
        args.push(request.source.as_os_str().to_owned());
        args.push(output);
        args
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, request: &FormatRequest<'_>) -> Result<FormatOutcome> {
        let args = self.arguments(request);
        debug!(
            "running {} {:?} in {}",
            self.command.program,
            args,
            self.working_dir.display()
        );

        let output = Command::new(&self.command.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(if self.forward_stdout {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RegenError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        if output.status.success() {
            Ok(FormatOutcome {
                diagnostics,
                ..FormatOutcome::succeeded()
            })
        } else {
            Ok(FormatOutcome::failed(output.status.code(), diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(argv: &[&str]) -> CommandFormatter {
        let argv = argv.iter().map(|arg| arg.to_string()).collect();
        CommandFormatter::new(FormatterCommand::from_argv(argv).unwrap(), ".")
    }

    #[test]
    fn arguments_follow_the_contract_order() {
        let style = Style::new("otbs").unwrap();
        let request = FormatRequest {
            style: &style,
            source: Path::new("/t/source/a.typ"),
            output: Path::new("/t/otbs/a.typ"),
        };
        let args = formatter(&["cargo", "run", "--"]).arguments(&request);
        assert_eq!(
            args,
            ["run", "--", "--style=otbs", "/t/source/a.typ", "--output=/t/otbs/a.typ"]
                .map(OsString::from)
        );
    }

    #[cfg(unix)]
    #[test]
    fn failure_status_and_stderr_are_captured() {
        let style = Style::new("default").unwrap();
        let request = FormatRequest {
            style: &style,
            source: Path::new("in"),
            output: Path::new("out"),
        };
        let outcome = formatter(&["sh", "-c", "echo broken >&2; exit 3", "fmt"])
            .format(&request)
            .unwrap();
        assert_eq!(outcome, FormatOutcome::failed(Some(3), "broken\n"));
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_not_mixed_into_diagnostics() {
        let style = Style::new("default").unwrap();
        let request = FormatRequest {
            style: &style,
            source: Path::new("in"),
            output: Path::new("out"),
        };
        let outcome = formatter(&["sh", "-c", "echo chatter; echo warned >&2", "fmt"])
            .silence_stdout()
            .format(&request)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.diagnostics, "warned\n");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let style = Style::new("default").unwrap();
        let request = FormatRequest {
            style: &style,
            source: Path::new("in"),
            output: Path::new("out"),
        };
        let err = formatter(&["snapregen-no-such-formatter"])
            .format(&request)
            .unwrap_err();
        assert!(matches!(err, RegenError::Spawn { .. }));
    }
}
