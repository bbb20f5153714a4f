//! A canonical, validated formatting style name.

use std::fmt;
use std::path::{Component, Path};

use serde::{Serialize, Serializer};

use crate::errors::{RegenError, Result};

/// Name of a formatting profile. Passed verbatim to the formatter as
/// `--style=<name>` and used as the directory name of that style's output tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Style(String);

impl Style {
    /// Validates `name` as a style.
    ///
    /// The name must be usable as a single directory name next to the corpus:
    /// non-empty, no path separators, and not `.` or `..`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: &str| RegenError::InvalidStyle {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }

        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name.as_str() => {}
            (Some(Component::CurDir | Component::ParentDir), None) => {
                return Err(invalid("relative path markers are not allowed"))
            }
            _ => return Err(invalid("name must be a single path component")),
        }

        Ok(Style(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for Style {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The style list used when nothing else is configured.
pub fn default_styles() -> Vec<Style> {
    vec![Style("default".to_string()), Style("otbs".to_string())]
}
