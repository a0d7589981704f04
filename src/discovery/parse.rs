//! Lightweight Go source header scanning.
//!
//! Rule generation only needs the package clause, the import list, cgo
//! usage, and any build constraint lines, so a full Go parser is overkill.
//! This scanner pulls those out of the raw source with compiled patterns,
//! the same approach Gantry takes for every structured-text extraction.

use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;

use crate::util::fs::read_to_string;

/// What the header scan extracts from one `.go` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoFileInfo {
    /// Name from the package clause.
    pub package_name: String,

    /// Import paths, in source order, excluding the cgo pseudo-import.
    pub imports: Vec<String>,

    /// Whether the file imports "C".
    pub is_cgo: bool,

    /// Raw build constraint expressions found above the package clause.
    pub constraints: Vec<String>,
}

/// Scanner with its patterns compiled once.
pub struct GoHeaderParser {
    package_clause: Regex,
    single_import: Regex,
    import_block: Regex,
    quoted_path: Regex,
    build_line: Regex,
}

impl GoHeaderParser {
    pub fn new() -> Self {
        GoHeaderParser {
            package_clause: Regex::new(r"(?m)^package\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
            single_import: Regex::new(r#"(?m)^import\s+(?:[A-Za-z_.][A-Za-z0-9_]*\s+)?"([^"]+)""#)
                .unwrap(),
            import_block: Regex::new(r"(?ms)^import\s*\((.*?)\)").unwrap(),
            quoted_path: Regex::new(r#""([^"]+)""#).unwrap(),
            build_line: Regex::new(r"(?m)^//(?:go:build|\s*\+build)\s+(.+)$").unwrap(),
        }
    }

    /// Scan a source file on disk.
    pub fn parse_file(&self, path: &Path) -> Result<GoFileInfo> {
        let contents = read_to_string(path)?;
        self.parse(&contents)
            .with_context(|| format!("failed to scan {}", path.display()))
    }

    /// Scan source text.
    pub fn parse(&self, contents: &str) -> Result<GoFileInfo> {
        let Some(pkg_cap) = self.package_clause.captures(contents) else {
            bail!("no package clause found");
        };
        let package_offset = pkg_cap.get(0).map(|m| m.start()).unwrap_or(0);

        let mut info = GoFileInfo {
            package_name: pkg_cap[1].to_string(),
            ..Default::default()
        };

        // Constraint lines only count above the package clause.
        for cap in self.build_line.captures_iter(&contents[..package_offset]) {
            info.constraints.push(cap[1].trim().to_string());
        }

        for cap in self.single_import.captures_iter(contents) {
            self.record_import(&mut info, &cap[1]);
        }
        for block in self.import_block.captures_iter(contents) {
            for cap in self.quoted_path.captures_iter(&block[1]) {
                self.record_import(&mut info, &cap[1]);
            }
        }

        Ok(info)
    }

    fn record_import(&self, info: &mut GoFileInfo, path: &str) {
        if path == "C" {
            info.is_cgo = true;
        } else if !info.imports.iter().any(|p| p == path) {
            info.imports.push(path.to_string());
        }
    }
}

impl Default for GoHeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an import path refers to the Go standard library.
///
/// Convention: external packages live under a domain, so a first path
/// segment without a dot is standard library.
pub fn is_standard_import(import_path: &str) -> bool {
    let first = import_path.split('/').next().unwrap_or(import_path);
    !first.contains('.')
}
