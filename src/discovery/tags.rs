//! Build-tag and platform constraint handling.
//!
//! Go sources opt in and out of builds two ways: filename suffixes
//! (`foo_linux.go`, `foo_amd64.go`, `foo_linux_arm64.go`) and build
//! constraint comment lines. Both are evaluated against the configured tag
//! set and target platform before a file is admitted to a package.

use std::collections::BTreeSet;

/// Operating systems recognized in filename suffixes.
pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "illumos", "ios", "js", "linux", "netbsd",
    "openbsd", "plan9", "solaris", "wasip1", "windows",
];

/// Architectures recognized in filename suffixes.
pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "arm", "arm64", "loong64", "mips", "mips64", "mips64le", "mipsle", "ppc64",
    "ppc64le", "riscv64", "s390x", "wasm",
];

/// The platform a generation run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConstraints {
    /// Target operating system, e.g. `linux`.
    pub os: String,

    /// Target architecture, e.g. `amd64`.
    pub arch: String,
}

impl Default for PlatformConstraints {
    fn default() -> Self {
        PlatformConstraints {
            os: "linux".to_string(),
            arch: "amd64".to_string(),
        }
    }
}

/// Add the tags that are implicitly true for every generation run: the
/// default compiler tag plus the target OS and architecture.
///
/// Runs once while the generator configuration is constructed; the tag set
/// is read-only afterwards.
pub fn preprocess_tags(tags: &mut BTreeSet<String>, platforms: &PlatformConstraints) {
    tags.insert("gc".to_string());
    tags.insert(platforms.os.clone());
    tags.insert(platforms.arch.clone());
}

/// Whether a file name's platform suffix admits it on the target platform.
///
/// `foo_windows.go` is excluded when targeting linux; `foo_linux_arm.go`
/// requires both the OS and the architecture to match. A trailing `_test`
/// component is not a platform suffix.
pub fn filename_matches(file_name: &str, platforms: &PlatformConstraints) -> bool {
    let Some(stem) = file_name.strip_suffix(".go") else {
        return false;
    };
    let stem = stem.strip_suffix("_test").unwrap_or(stem);

    // The suffix rule requires a nonempty name before it: `a_linux.go` is
    // constrained, a bare `linux.go` is not.
    let parts: Vec<&str> = stem.split('_').collect();
    match parts.as_slice() {
        // name_os_arch.go
        [rest @ .., os, arch]
            if !rest.is_empty() && KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) =>
        {
            *os == platforms.os && *arch == platforms.arch
        }
        // name_os.go or name_arch.go
        [rest @ .., last] if !rest.is_empty() && KNOWN_OS.contains(last) => *last == platforms.os,
        [rest @ .., last] if !rest.is_empty() && KNOWN_ARCH.contains(last) => {
            *last == platforms.arch
        }
        _ => true,
    }
}

/// Whether a file name denotes a test source.
pub fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with("_test.go")
}

/// Evaluate one build constraint line against the tag set.
///
/// Handles the `// +build` grammar: space-separated terms are OR'd,
/// comma-separated factors within a term are AND'd, and a leading `!`
/// negates a factor. `//go:build` lines with a single possibly-negated tag
/// are handled through the same path; richer boolean expressions are out of
/// scope for a header scan and evaluate as satisfied.
pub fn constraint_satisfied(expr: &str, tags: &BTreeSet<String>) -> bool {
    let expr = expr.trim();
    if expr.is_empty() || expr.contains("&&") || expr.contains("||") || expr.contains('(') {
        return true;
    }

    expr.split_whitespace().any(|term| {
        term.split(',').all(|factor| {
            if let Some(tag) = factor.strip_prefix('!') {
                !tags.contains(tag)
            } else {
                tags.contains(factor)
            }
        })
    })
}
