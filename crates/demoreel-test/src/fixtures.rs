//! Test fixtures.

use std::path::{Path, PathBuf};

use demoreel_core::DemoName;
use tempfile::TempDir;

/// Build a [`DemoName`], panicking on invalid input.
///
/// # Panics
///
/// Panics if `raw` is not a valid demo name.
#[must_use]
pub fn name(raw: &str) -> DemoName {
    DemoName::new(raw).expect("valid demo name in test")
}

/// A small catalog in the superbible naming scheme.
///
/// Every demo runs `command` with the demo's short name as its only
/// argument; `_ch2_main` is an alias of `_default`.
#[must_use]
pub fn sample_catalog(command: &str) -> String {
    format!(
        r#"[catalog]
name = "superbible"

[[demo]]
name = "_default"
command = "{command}"
args = ["default"]

[[demo]]
name = "_ch5_10_alienrain"
command = "{command}"
args = ["ch5_10_alienrain"]

[[demo]]
name = "_ch3_1_vertexattr"
command = "{command}"
args = ["ch3_1_vertexattr"]

[[demo]]
name = "_ch5_9_mirrorclampedge"
command = "{command}"
args = ["ch5_9_mirrorclampedge"]

[aliases]
_ch2_main = "_default"
"#
    )
}

/// A catalog manifest written into a temporary directory.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct TempCatalog {
    dir: TempDir,
    path: PathBuf,
}

impl TempCatalog {
    /// Write `contents` to `Demos.toml` in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory or file cannot be created.
    #[must_use]
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("Demos.toml");
        std::fs::write(&path, contents).expect("write catalog");
        Self { dir, path }
    }

    /// Path of the manifest file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
