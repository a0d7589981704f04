//! Core data structures for Gantry.
//!
//! This module contains the foundational types used throughout Gantry:
//! - Labels identifying build targets
//! - The structured form of a generated BUILD file
//! - Discovered package descriptors

pub mod build_file;
pub mod label;
pub mod package;

pub use build_file::{AttrValue, BuildFile, CallStmt, LoadStmt, Stmt};
pub use label::{Label, DEFAULT_LIBRARY_NAME, DEFAULT_TEST_NAME};
pub use package::GoPackage;
