//! Per-package rule synthesis.
//!
//! Given one discovered package and its repository-relative path, decide
//! which rules the package produces (library, cgo library, binary, test)
//! and with which attributes. The output order here is authoritative: the
//! assembler never reorders rules.

pub mod resolver;

pub use resolver::{LabelResolver, ResolutionError, VendoredResolver};

use crate::core::{CallStmt, GoPackage, DEFAULT_LIBRARY_NAME, DEFAULT_TEST_NAME};
use crate::discovery::is_standard_import;

/// Rule kinds, in the order they are probed for load-directive synthesis.
pub mod kinds {
    pub const PREFIX: &str = "go_prefix";
    pub const LIBRARY: &str = "go_library";
    pub const BINARY: &str = "go_binary";
    pub const TEST: &str = "go_test";
    pub const CGO_LIBRARY: &str = "cgo_library";

    /// Every kind the generator is capable of emitting.
    pub const ALL: &[&str] = &[PREFIX, LIBRARY, BINARY, TEST, CGO_LIBRARY];
}

const PUBLIC_VISIBILITY: &str = "//visibility:public";

/// Synthesizes the rule invocations for one package.
pub struct RuleGenerator<'a> {
    resolver: &'a dyn LabelResolver,
}

impl<'a> RuleGenerator<'a> {
    pub fn new(resolver: &'a dyn LabelResolver) -> Self {
        RuleGenerator { resolver }
    }

    /// Produce the ordered rule invocations for `pkg`, whose directory is
    /// `rel` (forward-slash, repository-relative, empty for the root).
    pub fn generate(&self, rel: &str, pkg: &GoPackage) -> Vec<CallStmt> {
        let mut rules = Vec::new();
        let has_library = !pkg.is_command() && (pkg.has_cgo() || !pkg.library_files.is_empty());

        if pkg.is_command() {
            rules.push(
                CallStmt::new(kinds::BINARY)
                    .with_attr("name", binary_name(rel, pkg))
                    .with_list_attr("srcs", pkg.build_files())
                    .with_list_attr("visibility", [PUBLIC_VISIBILITY])
                    .with_list_attr("deps", self.resolve_deps(rel, pkg.imports.iter())),
            );
        } else if has_library {
            let kind = if pkg.has_cgo() {
                kinds::CGO_LIBRARY
            } else {
                kinds::LIBRARY
            };
            rules.push(
                CallStmt::new(kind)
                    .with_attr("name", DEFAULT_LIBRARY_NAME)
                    .with_list_attr("srcs", pkg.build_files())
                    .with_list_attr("visibility", [PUBLIC_VISIBILITY])
                    .with_list_attr("deps", self.resolve_deps(rel, pkg.imports.iter())),
            );
        }

        if !pkg.test_files.is_empty() {
            let mut sorted_tests = pkg.test_files.clone();
            sorted_tests.sort();
            let mut test = CallStmt::new(kinds::TEST)
                .with_attr("name", DEFAULT_TEST_NAME)
                .with_list_attr("srcs", sorted_tests);
            if has_library {
                test = test.with_attr("library", format!(":{}", DEFAULT_LIBRARY_NAME));
            }
            test = test.with_list_attr("deps", self.resolve_deps(rel, pkg.test_imports.iter()));
            rules.push(test);
        }

        rules
    }

    /// Resolve non-stdlib imports to dep labels. A resolution failure drops
    /// that one dep with a warning; the rule is still emitted.
    fn resolve_deps<'i>(
        &self,
        rel: &str,
        imports: impl Iterator<Item = &'i String>,
    ) -> Vec<String> {
        let mut deps: Vec<String> = imports
            .filter(|path| !is_standard_import(path))
            .filter_map(|path| match self.resolver.resolve(path, rel) {
                Ok(label) => Some(label.to_string()),
                Err(err) => {
                    tracing::warn!("dropping dep in //{}: {}", rel, err);
                    None
                }
            })
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }
}

/// Binary targets are named after their directory; a command at the
/// repository root falls back to the directory's base name on disk.
fn binary_name(rel: &str, pkg: &GoPackage) -> String {
    match rel.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => seg.to_string(),
        _ => pkg.dir_base().to_string(),
    }
}
