//! Label resolution strategies.
//!
//! Resolution turns a source-level import path into the label of the build
//! target providing it. Strategies are polymorphic behind `LabelResolver`;
//! this crate ships the vendoring convention, where every external import
//! lives under the repository's `vendor/` subtree. Other strategies
//! (external dependency tables, same-repository siblings) plug in behind
//! the same trait.

use thiserror::Error;

use crate::core::Label;

/// Error when a strategy cannot determine a label for an import path.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("import `{import_path}` is outside the domain of the `{strategy}` strategy")]
    OutsideDomain {
        import_path: String,
        strategy: &'static str,
    },
}

/// Maps a source import path, given the importing directory, to a label.
pub trait LabelResolver {
    /// `source_dir` is the repository-relative directory of the importing
    /// package. Some strategies need it to disambiguate relative imports;
    /// others ignore it.
    fn resolve(&self, import_path: &str, source_dir: &str) -> Result<Label, ResolutionError>;
}

/// Resolves every import as a package under `vendor/`.
///
/// Assumes one library target per vendored package directory, so the
/// target name is always the default library name.
pub struct VendoredResolver {
    import_prefix: String,
    is_repo_gopath: bool,
}

impl VendoredResolver {
    /// `is_repo_gopath` marks repositories whose root doubles as a GOPATH
    /// source root, placing vendored code under `src/<prefix>/vendor/`.
    pub fn new(import_prefix: impl Into<String>, is_repo_gopath: bool) -> Self {
        VendoredResolver {
            import_prefix: import_prefix.into(),
            is_repo_gopath,
        }
    }
}

impl LabelResolver for VendoredResolver {
    fn resolve(&self, import_path: &str, _source_dir: &str) -> Result<Label, ResolutionError> {
        let package_path = if self.is_repo_gopath {
            format!("src/{}/vendor/{}", self.import_prefix, import_path)
        } else {
            format!("vendor/{}", import_path)
        };
        Ok(Label::library(package_path))
    }
}
