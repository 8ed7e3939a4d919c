//! Temporary C++ source trees.
//!
//! [`SourceTree`] owns a temp directory and writes named files into it, so
//! tests can run analyses against real paths.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A test-scoped directory of source files.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative` (creating parent directories) and return
    /// the full path.
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("failed to write source file");
        path
    }

    /// Path inside the tree that is never written.
    pub fn missing(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}
