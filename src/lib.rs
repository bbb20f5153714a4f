//! Regenerates golden output trees for a code formatter.
//!
//! A corpus directory (`test/source`) is mirrored once per formatting style
//! (`test/default`, `test/otbs`, ...). Each style tree is deleted and rebuilt
//! on every run; every corpus file is replaced by the formatter's output for
//! that style.

pub use crate::config::{FailurePolicy, FormatterCommand, RegenConfig, RegenSettings};
pub use crate::errors::{RegenError, Result};
pub use crate::formatter::{CommandFormatter, FormatOutcome, FormatRequest, Formatter};
pub use crate::layout::TreeLayout;
pub use crate::regenerate::{regenerate, RunSummary, StyleSummary};
pub use crate::report::{ReportBuffer, ReportLine, ReportSink};
pub use crate::style::Style;

pub mod check;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod formatter;
pub mod layout;
pub mod regenerate;
pub mod report;
pub mod style;
