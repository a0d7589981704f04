//! Generator configuration.
//!
//! One `GeneratorConfig` describes one repository: where its root is, the
//! import-path prefix it is published under, the declaration-file name, the
//! build-tag set, and the label-resolution strategy. It is validated while
//! being constructed and read-only afterwards.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::discovery::tags::{preprocess_tags, PlatformConstraints};
use crate::rules::LabelResolver;

/// Conventional declaration-file name.
pub const DEFAULT_BUILD_FILE_NAME: &str = "BUILD";

/// Label of the file providing the Go rule definitions.
pub const DEFAULT_RULES_SOURCE: &str = "@io_bazel_rules_go//go:def.bzl";

/// Immutable configuration for one repository's generation runs.
pub struct GeneratorConfig {
    repo_root: PathBuf,
    import_prefix: String,
    build_file_name: String,
    build_tags: BTreeSet<String>,
    platforms: PlatformConstraints,
    rules_source: String,
    resolver: Box<dyn LabelResolver>,
}

impl GeneratorConfig {
    /// Validate and build a configuration. The repository root is made
    /// absolute here; failure to resolve it is a construction error.
    pub fn new(
        repo_root: impl AsRef<Path>,
        import_prefix: impl Into<String>,
        resolver: Box<dyn LabelResolver>,
    ) -> Result<Self> {
        let repo_root = std::fs::canonicalize(repo_root.as_ref()).with_context(|| {
            format!(
                "failed to resolve repository root: {}",
                repo_root.as_ref().display()
            )
        })?;

        let platforms = PlatformConstraints::default();
        let mut build_tags = BTreeSet::new();
        preprocess_tags(&mut build_tags, &platforms);

        Ok(GeneratorConfig {
            repo_root,
            import_prefix: import_prefix.into(),
            build_file_name: DEFAULT_BUILD_FILE_NAME.to_string(),
            build_tags,
            platforms,
            rules_source: DEFAULT_RULES_SOURCE.to_string(),
            resolver,
        })
    }

    /// Override the declaration-file name (e.g. `BUILD.bazel`).
    pub fn with_build_file_name(mut self, name: impl Into<String>) -> Self {
        self.build_file_name = name.into();
        self
    }

    /// Override the rule-definitions source label.
    pub fn with_rules_source(mut self, source: impl Into<String>) -> Self {
        self.rules_source = source.into();
        self
    }

    /// Add caller-supplied build tags. The platform-derived tags stay; this
    /// happens at construction time, never per generation call.
    pub fn with_build_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.build_tags.extend(tags);
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn import_prefix(&self) -> &str {
        &self.import_prefix
    }

    pub fn build_file_name(&self) -> &str {
        &self.build_file_name
    }

    pub fn build_tags(&self) -> &BTreeSet<String> {
        &self.build_tags
    }

    pub fn platforms(&self) -> &PlatformConstraints {
        &self.platforms
    }

    pub fn rules_source(&self) -> &str {
        &self.rules_source
    }

    pub fn resolver(&self) -> &dyn LabelResolver {
        self.resolver.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::VendoredResolver;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults_and_tags() {
        let tmp = TempDir::new().unwrap();
        let config = GeneratorConfig::new(
            tmp.path(),
            "example.com/proj",
            Box::new(VendoredResolver::new("example.com/proj", false)),
        )
        .unwrap()
        .with_build_tags(["purego".to_string()]);

        assert_eq!(config.build_file_name(), "BUILD");
        assert_eq!(config.rules_source(), DEFAULT_RULES_SOURCE);
        assert!(config.build_tags().contains("gc"));
        assert!(config.build_tags().contains("purego"));
        assert!(config.repo_root().is_absolute());
    }

    #[test]
    fn test_missing_root_is_a_construction_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let result = GeneratorConfig::new(
            &missing,
            "example.com/proj",
            Box::new(VendoredResolver::new("example.com/proj", false)),
        );
        assert!(result.is_err());
    }
}
