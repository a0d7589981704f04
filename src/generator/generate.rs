//! The repository orchestrator.
//!
//! `Generator::generate` turns the discovery sequence for a directory into
//! the ordered sequence of declaration files. Locally detectable problems
//! are logged and degrade to "skip this item"; the run itself always
//! completes and never panics.

use std::path::{Component, Path};

use anyhow::{anyhow, bail, Result};

use crate::core::BuildFile;
use crate::discovery::{Discovery, FsDiscovery};
use crate::generator::assemble::Assembler;
use crate::generator::config::GeneratorConfig;

/// Generates declaration files for a repository.
pub struct Generator {
    config: GeneratorConfig,
    discovery: Box<dyn Discovery>,
}

impl Generator {
    /// Generator backed by filesystem discovery.
    pub fn new(config: GeneratorConfig) -> Self {
        let discovery = Box::new(FsDiscovery::new(
            config.build_tags().clone(),
            config.platforms().clone(),
        ));
        Self::with_discovery(config, discovery)
    }

    /// Generator with an explicit discovery source.
    pub fn with_discovery(config: GeneratorConfig, discovery: Box<dyn Discovery>) -> Self {
        Generator { config, discovery }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one declaration file per buildable package at or beneath
    /// `dir`, which must be the repository root or a directory under it.
    ///
    /// Problems are logged rather than returned: an invalid `dir` yields an
    /// empty result, and a package whose path cannot be related to the root
    /// is skipped while the rest of the run continues.
    pub fn generate(&self, dir: &Path) -> Vec<BuildFile> {
        let dir = match std::fs::canonicalize(dir) {
            Ok(dir) => dir,
            Err(err) => {
                tracing::error!("cannot resolve {}: {}", dir.display(), err);
                return Vec::new();
            }
        };
        if !is_descending_dir(&dir, self.config.repo_root()) {
            tracing::error!(
                "dir {} is not under the repository root {}",
                dir.display(),
                self.config.repo_root().display()
            );
            return Vec::new();
        }

        let packages = match self.discovery.packages(&dir) {
            Ok(packages) => packages,
            Err(err) => {
                tracing::error!("package discovery failed under {}: {:#}", dir.display(), err);
                return Vec::new();
            }
        };

        let assembler = Assembler::new(&self.config);
        let mut files = Vec::new();
        for pkg in &packages {
            let rel = match self.relative_to_root(&pkg.dir) {
                Ok(rel) => rel,
                Err(err) => {
                    tracing::warn!("skipping {}: {:#}", pkg.dir.display(), err);
                    continue;
                }
            };

            // The scanned root had no buildable package of its own, but a
            // root file is still needed to declare the import prefix.
            if files.is_empty() && !rel.is_empty() {
                files.push(assembler.root_prefix_file());
            }

            files.push(assembler.assemble(&rel, pkg));
        }
        files
    }

    /// Forward-slash path of `dir` relative to the repository root; empty
    /// when `dir` is the root itself.
    fn relative_to_root(&self, dir: &Path) -> Result<String> {
        let root = self.config.repo_root();
        let rel = pathdiff::diff_paths(dir, root)
            .ok_or_else(|| anyhow!("cannot relate {} to {}", dir.display(), root.display()))?;

        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(seg) => segments.push(seg.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => bail!(
                    "{} is outside the repository root {}",
                    dir.display(),
                    root.display()
                ),
            }
        }
        Ok(segments.join("/"))
    }
}

/// Whether `dir` equals `root` or sits beneath it. Comparison is
/// component-wise, so `/repository` is not under `/repo`.
fn is_descending_dir(dir: &Path, root: &Path) -> bool {
    dir.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GoPackage, Stmt};
    use crate::rules::VendoredResolver;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Canned discovery sequence for orchestrator tests.
    struct Canned(Vec<GoPackage>);

    impl Discovery for Canned {
        fn packages(&self, _start_dir: &Path) -> Result<Vec<GoPackage>> {
            Ok(self.0.clone())
        }
    }

    fn config(root: &Path) -> GeneratorConfig {
        GeneratorConfig::new(
            root,
            "example.com/proj",
            Box::new(VendoredResolver::new("example.com/proj", false)),
        )
        .unwrap()
    }

    fn library_pkg(dir: PathBuf) -> GoPackage {
        let mut pkg = GoPackage::new(dir, "pkg");
        pkg.library_files = vec!["pkg.go".into()];
        pkg
    }

    fn is_prefix_file(file: &BuildFile) -> bool {
        file.statements
            .iter()
            .any(|s| matches!(s, Stmt::Call(c) if c.kind == "go_prefix"))
    }

    #[test]
    fn test_descendant_boundary() {
        assert!(is_descending_dir(Path::new("/repo"), Path::new("/repo")));
        assert!(is_descending_dir(Path::new("/repo/sub"), Path::new("/repo")));
        assert!(!is_descending_dir(Path::new("/repository"), Path::new("/repo")));
        assert!(!is_descending_dir(Path::new("/other"), Path::new("/repo")));
    }

    #[test]
    fn test_synthetic_root_file_emitted_once() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let root = config.repo_root().to_path_buf();

        let discovery = Canned(vec![
            library_pkg(root.join("a")),
            library_pkg(root.join("b")),
        ]);
        let generator = Generator::with_discovery(config, Box::new(discovery));

        let files = generator.generate(tmp.path());
        assert_eq!(files.len(), 3);
        assert!(is_prefix_file(&files[0]));
        assert_eq!(files.iter().filter(|f| is_prefix_file(f)).count(), 1);
        assert_eq!(files[1].output_path, Path::new("a/BUILD"));
        assert_eq!(files[2].output_path, Path::new("b/BUILD"));
    }

    #[test]
    fn test_no_synthetic_file_when_root_is_buildable() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let root = config.repo_root().to_path_buf();

        let discovery = Canned(vec![library_pkg(root.clone()), library_pkg(root.join("a"))]);
        let generator = Generator::with_discovery(config, Box::new(discovery));

        let files = generator.generate(tmp.path());
        assert_eq!(files.len(), 2);
        assert!(!is_prefix_file(&files[0]));
        assert_eq!(files[0].output_path, Path::new("BUILD"));
    }

    #[test]
    fn test_bad_package_skipped_run_continues() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let config = config(tmp.path());
        let root = config.repo_root().to_path_buf();

        let discovery = Canned(vec![
            library_pkg(root.join("a")),
            library_pkg(outside.path().join("elsewhere")),
            library_pkg(root.join("b")),
        ]);
        let generator = Generator::with_discovery(config, Box::new(discovery));

        let files = generator.generate(tmp.path());
        let paths: Vec<_> = files.iter().map(|f| f.output_path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("BUILD"),
                PathBuf::from("a/BUILD"),
                PathBuf::from("b/BUILD"),
            ]
        );
    }

    #[test]
    fn test_dir_outside_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let config = config(tmp.path());

        let generator = Generator::with_discovery(config, Box::new(Canned(vec![])));
        assert!(generator.generate(other.path()).is_empty());
    }

    #[test]
    fn test_missing_dir_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let generator = Generator::with_discovery(config, Box::new(Canned(vec![])));
        assert!(generator.generate(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(
            tmp.path().join("a/a.go"),
            "package a\n\nimport \"github.com/x/y\"\n",
        )
        .unwrap();

        let generator = Generator::new(config(tmp.path()));
        let first = generator.generate(tmp.path());
        let second = generator.generate(tmp.path());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
