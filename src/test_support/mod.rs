//! Test utilities for goven unit tests.
//!
//! This module provides scratch directory trees that tests can populate
//! with Go files and fake GOPATH workspaces.
//!
//! # Example
//!
//! ```rust,ignore
//! use goven::test_support::{GoTree, GopathFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tree = GoTree::new().file("main.go", "package main\n");
//!     assert_eq!(tree.read("main.go"), "package main\n");
//! }
//! ```

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

// Re-export fixtures for convenience
pub use fixtures::*;

/// A temporary directory tree populated file by file.
///
/// The tree is removed when the value is dropped.
#[derive(Debug)]
pub struct GoTree {
    _dir: TempDir,
    root: PathBuf,
}

impl GoTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        // Canonical so that symlinked temp roots compare equal to cwd paths.
        let root = dir.path().canonicalize().expect("failed to canonicalize temp dir");
        GoTree { _dir: dir, root }
    }

    /// Add a file, creating parent directories as needed.
    pub fn file(self, rel: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.write(rel, content);
        self
    }

    /// Add an empty directory.
    pub fn dir(self, rel: impl AsRef<Path>) -> Self {
        fs::create_dir_all(self.root.join(rel)).expect("failed to create dir");
        self
    }

    /// Write a file in place, creating parent directories as needed.
    pub fn write(&self, rel: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write file");
    }

    /// Read a file as a string.
    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root.join(rel)).expect("failed to read file")
    }

    /// Check whether a path exists below the root.
    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.root.join(rel).exists()
    }

    /// The root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Default for GoTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_tree() {
        let tree = GoTree::new()
            .file("a/b/c.go", "package c\n")
            .dir("empty");

        assert_eq!(tree.read("a/b/c.go"), "package c\n");
        assert!(tree.exists("empty"));
        assert!(tree.path().is_absolute());
    }
}
