//! Configuration file support for Gantry.
//!
//! A repository may carry a `gantry.toml` at its root with generation
//! defaults; command-line flags always take precedence over it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the optional per-repository configuration file.
pub const CONFIG_FILE_NAME: &str = "gantry.toml";

/// Gantry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation defaults
    pub generate: GenerateDefaults,
}

/// Defaults for `gantry generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateDefaults {
    /// Import-path prefix of the repository (e.g. `example.com/proj`)
    pub prefix: Option<String>,

    /// Declaration-file name (e.g. `BUILD` or `BUILD.bazel`)
    pub build_name: Option<String>,

    /// Additional build tags considered true
    pub tags: Vec<String>,

    /// Whether the repository root doubles as a GOPATH source root
    pub gopath_layout: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[generate]
prefix = "example.com/proj"
build_name = "BUILD.bazel"
tags = ["purego"]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.generate.prefix.as_deref(), Some("example.com/proj"));
        assert_eq!(config.generate.build_name.as_deref(), Some("BUILD.bazel"));
        assert_eq!(config.generate.tags, vec!["purego"]);
        assert!(!config.generate.gopath_layout);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join(CONFIG_FILE_NAME));
        assert!(config.generate.prefix.is_none());
    }
}
