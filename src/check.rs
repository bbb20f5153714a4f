//! Read-only completeness audit of the output trees.
//!
//! Verifies that every corpus directory is mirrored and that every corpus file
//! passing the include filter has an output file, for every style. Contents
//! are not compared.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::RegenConfig;
use crate::discovery::{CorpusDiscoverer, CorpusEntry};
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MirrorReport {
    /// Number of expected output entries examined.
    pub checked: usize,
    /// Expected outputs that do not exist, relative to the test-area root.
    pub missing: Vec<PathBuf>,
}

impl MirrorReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_mirror(config: &RegenConfig) -> Result<MirrorReport> {
    let layout = &config.layout;
    let entries = CorpusDiscoverer::discover(layout.source_root())?;

    let mut report = MirrorReport::default();
    for style in &config.styles {
        for entry in &entries {
            let expected = match entry {
                CorpusEntry::Directory(dir) => layout.map_to_style(dir, style)?,
                CorpusEntry::File(file) if config.includes(file) => {
                    layout.map_to_style(file, style)?
                }
                CorpusEntry::File(_) | CorpusEntry::Unsupported(_) => continue,
            };
            let present = match entry {
                CorpusEntry::Directory(_) => expected.is_dir(),
                _ => expected.is_file(),
            };
            report.checked += 1;
            if !present {
                report.missing.push(layout.display_path(&expected));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::RegenSettings;

    #[test]
    fn reports_missing_files_and_directories_per_style() {
        let dir = tempfile::tempdir().unwrap();
        let test = dir.path().join("test");
        fs::create_dir_all(test.join("source/sub")).unwrap();
        fs::write(test.join("source/a.txt"), "a").unwrap();
        fs::write(test.join("source/sub/b.txt"), "b").unwrap();
        fs::create_dir_all(test.join("default/sub")).unwrap();
        fs::write(test.join("default/a.txt"), "a").unwrap();
        fs::write(test.join("default/sub/b.txt"), "b").unwrap();
        fs::create_dir_all(test.join("otbs")).unwrap();
        fs::write(test.join("otbs/a.txt"), "a").unwrap();

        let config = RegenSettings {
            test_dir: test,
            ..RegenSettings::default()
        }
        .resolve()
        .unwrap();
        let report = check_mirror(&config).unwrap();

        assert_eq!(report.checked, 8);
        assert_eq!(
            report.missing,
            vec![PathBuf::from("otbs/sub"), PathBuf::from("otbs/sub/b.txt")]
        );
        assert!(!report.is_complete());
    }
}
