//! # Snapregen test fixtures
//!
//! A scratch test area with a small corpus and a shell formatter that honours
//! the `--style=<s> <source> --output=<out>` contract.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use snapregen::RegenSettings;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Prefixes the source text with `[<style>]`.
pub const TAGGING_FORMATTER: &str = r#"style="${1#--style=}"
out="${3#--output=}"
{ echo "[$style]"; cat "$2"; } > "$out"
"#;

/// Fails (exit 2, message on stderr) for sources containing `FAIL`.
pub const PICKY_FORMATTER: &str = r#"if grep -q FAIL "$2"; then
  echo "cannot format $2" >&2
  exit 2
fi
cp "$2" "${3#--output=}"
"#;

/// Announces each file on stdout, then copies it.
pub const CHATTY_FORMATTER: &str = r#"echo "chatty formatter saw $2"
cp "$2" "${3#--output=}"
"#;

/// Writes its working directory into the output file.
pub const CWD_FORMATTER: &str = r#"pwd > "${3#--output=}"
"#;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// `test/source/a.txt` and `test/source/sub/b.txt`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("test/source");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("a.txt"), "alpha\n").unwrap();
        fs::write(source.join("sub/b.txt"), "beta\n").unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn test_dir(&self) -> PathBuf {
        self.root().join("test")
    }

    pub fn write_source(&self, relative: &str, contents: &str) {
        let path = self.test_dir().join("source").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Saves a formatter script and returns its absolute path.
    pub fn script(&self, body: &str) -> PathBuf {
        let path = self.root().join("fmt.sh");
        fs::write(&path, body).unwrap();
        path
    }

    /// Settings pointing at this fixture and running `body` through `sh`.
    pub fn settings(&self, body: &str) -> RegenSettings {
        RegenSettings {
            test_dir: self.test_dir(),
            formatter: vec![
                "sh".to_string(),
                self.script(body).display().to_string(),
            ],
            ..RegenSettings::default()
        }
    }

    /// Writes `regen.yaml` next to the test area and returns its path.
    pub fn config_file(&self, body: &str, extra: &str) -> PathBuf {
        let script = self.script(body);
        let path = self.root().join("regen.yaml");
        fs::write(
            &path,
            format!(
                "test_dir: test\nformatter: [sh, '{}']\n{extra}",
                script.display()
            ),
        )
        .unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.test_dir().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.test_dir().join(relative).exists()
    }
}

/// Every path under `root` with its contents; directories map to `None`.
pub fn tree_contents(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let contents = entry
                .file_type()
                .is_file()
                .then(|| fs::read(entry.path()).unwrap());
            (relative, contents)
        })
        .collect()
}
