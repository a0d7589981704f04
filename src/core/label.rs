//! Build target labels.
//!
//! A Label identifies a build target as a package path plus a target name,
//! rendered in the familiar `//pkg/path:name` form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target name used for the single library target of a package directory.
pub const DEFAULT_LIBRARY_NAME: &str = "go_default_library";

/// Target name used for the test target of a package directory.
pub const DEFAULT_TEST_NAME: &str = "go_default_test";

/// Identifies a build target within the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Slash-separated path, relative to the repository root, of the
    /// directory containing the target. Empty for the root itself.
    pub package_path: String,

    /// Name of the target within that directory's BUILD file.
    pub target_name: String,
}

impl Label {
    /// Create a label with an explicit target name.
    pub fn new(package_path: impl Into<String>, target_name: impl Into<String>) -> Self {
        Label {
            package_path: package_path.into(),
            target_name: target_name.into(),
        }
    }

    /// Create a label for the conventional library target of a package.
    pub fn library(package_path: impl Into<String>) -> Self {
        Self::new(package_path, DEFAULT_LIBRARY_NAME)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}:{}", self.package_path, self.target_name)
    }
}
