//! Repository tree walk producing package descriptors.
//!
//! `Discovery` is the seam between the walk and the generator: the
//! generator consumes a finite, deterministically ordered sequence of
//! packages and never touches the filesystem itself, so tests can feed it
//! canned sequences.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::GoPackage;
use crate::discovery::parse::GoHeaderParser;
use crate::discovery::tags::{self, PlatformConstraints};

/// Produces the buildable packages at or beneath a directory.
pub trait Discovery {
    /// Deterministic for a fixed filesystem state; order is otherwise
    /// unspecified.
    fn packages(&self, start_dir: &Path) -> Result<Vec<GoPackage>>;
}

/// Filesystem-backed discovery.
pub struct FsDiscovery {
    build_tags: BTreeSet<String>,
    platforms: PlatformConstraints,
    parser: GoHeaderParser,
}

impl FsDiscovery {
    pub fn new(build_tags: BTreeSet<String>, platforms: PlatformConstraints) -> Self {
        FsDiscovery {
            build_tags,
            platforms,
            parser: GoHeaderParser::new(),
        }
    }

    /// Scan one directory for a buildable package.
    fn scan_dir(&self, dir: &Path) -> Result<Option<GoPackage>> {
        let mut file_names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".go") && entry.file_type()?.is_file() {
                file_names.push(name);
            }
        }
        file_names.sort();

        let mut pkg = GoPackage::new(dir, "");
        let mut test_package_name: Option<String> = None;

        for name in file_names {
            if !tags::filename_matches(&name, &self.platforms) {
                continue;
            }

            let path = dir.join(&name);
            let info = match self.parser.parse_file(&path) {
                Ok(info) => info,
                Err(err) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), err);
                    continue;
                }
            };
            if !info
                .constraints
                .iter()
                .all(|c| tags::constraint_satisfied(c, &self.build_tags))
            {
                continue;
            }

            if tags::is_test_file(&name) {
                test_package_name
                    .get_or_insert_with(|| info.package_name.trim_end_matches("_test").to_string());
                pkg.test_files.push(name);
                pkg.test_imports.extend(info.imports);
                continue;
            }

            if pkg.name.is_empty() {
                pkg.name = info.package_name.clone();
            } else if pkg.name != info.package_name {
                tracing::warn!(
                    "skipping {}: conflicting package names `{}` and `{}`",
                    dir.display(),
                    pkg.name,
                    info.package_name
                );
                return Ok(None);
            }

            if info.is_cgo {
                pkg.cgo_files.push(name);
            } else {
                pkg.library_files.push(name);
            }
            pkg.imports.extend(info.imports);
        }

        // A directory holding only test files still names its package.
        if pkg.name.is_empty() {
            match test_package_name {
                Some(name) => pkg.name = name,
                None => return Ok(None),
            }
        }

        Ok(pkg.is_buildable().then_some(pkg))
    }
}

impl Discovery for FsDiscovery {
    fn packages(&self, start_dir: &Path) -> Result<Vec<GoPackage>> {
        let mut packages = Vec::new();

        let walker = WalkDir::new(start_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || visit_dir_entry(e.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("walk error under {}: {}", start_dir.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            match self.scan_dir(entry.path()) {
                Ok(Some(pkg)) => packages.push(pkg),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("skipping {}: {:#}", entry.path().display(), err);
                }
            }
        }

        Ok(packages)
    }
}

/// Directory names the walk descends into. Hidden directories and Go's
/// `testdata` convention are pruned.
fn visit_dir_entry(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    !name.starts_with('.') && name != "testdata"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    fn discovery() -> FsDiscovery {
        let mut build_tags = BTreeSet::new();
        let platforms = PlatformConstraints::default();
        tags::preprocess_tags(&mut build_tags, &platforms);
        FsDiscovery::new(build_tags, platforms)
    }

    #[test]
    fn test_walk_finds_nested_packages() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "root.go",
            "package proj\n\nimport \"fmt\"\n",
        );
        write(
            &tmp.path().join("sub"),
            "sub.go",
            "package sub\n\nimport \"github.com/x/y\"\n",
        );

        let pkgs = discovery().packages(tmp.path()).unwrap();
        assert_eq!(pkgs.len(), 2);
        assert_eq!(pkgs[0].name, "proj");
        assert_eq!(pkgs[1].name, "sub");
        assert!(pkgs[1].imports.contains("github.com/x/y"));
    }

    #[test]
    fn test_walk_classifies_tests_and_cgo() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("pkg");
        write(&dir, "lib.go", "package pkg\n");
        write(&dir, "lib_test.go", "package pkg\n\nimport \"testing\"\n");
        write(&dir, "wrap.go", "package pkg\n\nimport \"C\"\n");

        let pkgs = discovery().packages(tmp.path()).unwrap();
        assert_eq!(pkgs.len(), 1);
        let pkg = &pkgs[0];
        assert_eq!(pkg.library_files, vec!["lib.go"]);
        assert_eq!(pkg.cgo_files, vec!["wrap.go"]);
        assert_eq!(pkg.test_files, vec!["lib_test.go"]);
    }

    #[test]
    fn test_walk_filters_other_platforms_and_hidden_dirs() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("net");
        write(&dir, "conn_linux.go", "package net\n");
        write(&dir, "conn_windows.go", "package net\n");
        write(&tmp.path().join(".git"), "junk.go", "package junk\n");
        write(&tmp.path().join("testdata"), "fixture.go", "package fixture\n");

        let pkgs = discovery().packages(tmp.path()).unwrap();
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].library_files, vec!["conn_linux.go"]);
    }

    #[test]
    fn test_unparseable_file_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("pkg");
        write(&dir, "good.go", "package pkg\n");
        write(&dir, "bad.go", "// no package clause\n");

        let pkgs = discovery().packages(tmp.path()).unwrap();
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].library_files, vec!["good.go"]);
    }

    #[test]
    fn test_constrained_out_file_excluded() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("pkg");
        write(&dir, "plan9.go", "//go:build plan9\n\npackage pkg\n");
        write(&dir, "any.go", "package pkg\n");

        let pkgs = discovery().packages(tmp.path()).unwrap();
        assert_eq!(pkgs[0].library_files, vec!["any.go"]);
    }
}
