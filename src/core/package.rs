//! Discovered package descriptors.
//!
//! A `GoPackage` is what discovery hands to rule synthesis: one buildable
//! directory, its classified source files, and the imports of each file
//! class. Consumed read-only downstream.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// A buildable package found in one directory of the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackage {
    /// Absolute path of the directory containing the package.
    pub dir: PathBuf,

    /// Package name from the package clause of its non-test files.
    pub name: String,

    /// Plain library sources (no cgo, not tests).
    pub library_files: Vec<String>,

    /// Library sources that use cgo.
    pub cgo_files: Vec<String>,

    /// Test sources (`*_test.go`), including external `_test` packages.
    pub test_files: Vec<String>,

    /// Imports of the non-test sources.
    pub imports: BTreeSet<String>,

    /// Imports of the test sources.
    pub test_imports: BTreeSet<String>,
}

impl GoPackage {
    /// Create an empty package descriptor for a directory.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        GoPackage {
            dir: dir.into(),
            name: name.into(),
            library_files: Vec::new(),
            cgo_files: Vec::new(),
            test_files: Vec::new(),
            imports: BTreeSet::new(),
            test_imports: BTreeSet::new(),
        }
    }

    /// Whether this package builds a command (`package main`).
    pub fn is_command(&self) -> bool {
        self.name == "main"
    }

    /// Whether any source in the package uses cgo.
    pub fn has_cgo(&self) -> bool {
        !self.cgo_files.is_empty()
    }

    /// Whether discovery found anything worth generating rules for.
    pub fn is_buildable(&self) -> bool {
        !self.library_files.is_empty() || !self.cgo_files.is_empty() || !self.test_files.is_empty()
    }

    /// The directory's base name, used to name binary targets.
    pub fn dir_base(&self) -> &str {
        self.dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("main")
    }

    /// All non-test sources, sorted.
    pub fn build_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .library_files
            .iter()
            .chain(self.cgo_files.iter())
            .cloned()
            .collect();
        files.sort();
        files
    }
}
