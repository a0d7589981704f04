//! The structured form of a generated BUILD file.
//!
//! A `BuildFile` is an output path plus an ordered statement sequence. The
//! first statement, when present, is the `load(...)` directive naming the
//! rule kinds used in the file; the remainder are rule invocations in the
//! order rule synthesis produced them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One generated declaration file, ready for rendering and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFile {
    /// Path of the file relative to the repository root.
    pub output_path: PathBuf,

    /// Ordered statements; `statements[0]` is the load directive iff the
    /// file uses any rule kinds at all.
    pub statements: Vec<Stmt>,
}

impl BuildFile {
    /// Create an empty file at the given output path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        BuildFile {
            output_path: output_path.into(),
            statements: Vec::new(),
        }
    }

    /// The rule kinds invoked in this file, in statement order, with
    /// duplicates preserved.
    pub fn rule_kinds(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().filter_map(|s| match s {
            Stmt::Call(call) => Some(call.kind.as_str()),
            Stmt::Load(_) => None,
        })
    }
}

/// A top-level statement in a BUILD file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// A `load("<source>", "kind", ...)` directive.
    Load(LoadStmt),

    /// A rule invocation.
    Call(CallStmt),
}

/// The directive loading rule definitions used in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStmt {
    /// Label of the file providing the rule definitions.
    pub source: String,

    /// Rule kinds to load, deduplicated and lexicographically sorted.
    pub kinds: Vec<String>,
}

impl LoadStmt {
    /// Build a load directive, sorting and deduplicating the kinds.
    pub fn new(source: impl Into<String>, mut kinds: Vec<String>) -> Self {
        kinds.sort();
        kinds.dedup();
        LoadStmt {
            source: source.into(),
            kinds,
        }
    }
}

/// A rule invocation expression, e.g. `go_library(name = ..., srcs = ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStmt {
    /// The rule kind being invoked.
    pub kind: String,

    /// Positional arguments, rendered before any keyword attributes.
    pub positional: Vec<AttrValue>,

    /// Keyword attributes in rendering order.
    pub attrs: Vec<(String, AttrValue)>,
}

impl CallStmt {
    /// Create an invocation of the given rule kind with no arguments.
    pub fn new(kind: impl Into<String>) -> Self {
        CallStmt {
            kind: kind.into(),
            positional: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Append a positional string argument.
    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(AttrValue::String(value.into()));
        self
    }

    /// Append a string attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .push((key.into(), AttrValue::String(value.into())));
        self
    }

    /// Append a list attribute. Empty lists are dropped.
    pub fn with_list_attr(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let values: Vec<String> = values.into_iter().map(|v| v.into()).collect();
        if !values.is_empty() {
            self.attrs.push((key.into(), AttrValue::List(values)));
        }
        self
    }

    /// Look up the `name` attribute, if any.
    pub fn name(&self) -> Option<&str> {
        self.attrs.iter().find_map(|(k, v)| match (k.as_str(), v) {
            ("name", AttrValue::String(s)) => Some(s.as_str()),
            _ => None,
        })
    }
}

/// An attribute value in a rule invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    /// A quoted string literal.
    String(String),

    /// A list of quoted string literals.
    List(Vec<String>),
}
