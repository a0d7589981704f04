//! Assembly of one declaration file.
//!
//! The assembler wraps the synthesized rules of one package into a
//! `BuildFile` and prepends the load directive covering exactly the rule
//! kinds the file uses. It also builds the synthetic root file emitted when
//! the repository root itself holds no buildable package.

use std::path::{Path, PathBuf};

use crate::core::{BuildFile, CallStmt, GoPackage, LoadStmt, Stmt};
use crate::generator::config::GeneratorConfig;
use crate::rules::{kinds, RuleGenerator};

pub struct Assembler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Assembler { config }
    }

    /// Build the declaration file for one package. `rel` is the package's
    /// forward-slash, repository-relative directory (empty for the root).
    pub fn assemble(&self, rel: &str, pkg: &GoPackage) -> BuildFile {
        let rules = RuleGenerator::new(self.config.resolver()).generate(rel, pkg);

        let mut file = BuildFile::new(output_path(rel, self.config.build_file_name()));
        file.statements = rules.into_iter().map(Stmt::Call).collect();
        self.prepend_load(&mut file);
        file
    }

    /// The root-level file declaring only the repository's import prefix,
    /// used when the root directory has no buildable package of its own.
    pub fn root_prefix_file(&self) -> BuildFile {
        let mut file = BuildFile::new(output_path("", self.config.build_file_name()));
        file.statements.push(Stmt::Call(
            CallStmt::new(kinds::PREFIX).with_positional(self.config.import_prefix()),
        ));
        self.prepend_load(&mut file);
        file
    }

    /// Compute the minimal load directive and insert it first. A file using
    /// no rule kinds gets no directive at all.
    fn prepend_load(&self, file: &mut BuildFile) {
        let present: Vec<String> = kinds::ALL
            .iter()
            .filter(|kind| file.rule_kinds().any(|k| k == **kind))
            .map(|kind| kind.to_string())
            .collect();
        if present.is_empty() {
            return;
        }
        file.statements.insert(
            0,
            Stmt::Load(LoadStmt::new(self.config.rules_source(), present)),
        );
    }
}

fn output_path(rel: &str, build_file_name: &str) -> PathBuf {
    if rel.is_empty() {
        PathBuf::from(build_file_name)
    } else {
        Path::new(rel).join(build_file_name)
    }
}
