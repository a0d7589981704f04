//! Gantry - a Bazel BUILD file generator for Go repositories
//!
//! This crate provides the core library functionality for Gantry:
//! discovering buildable packages under a repository tree, synthesizing
//! rules for each one, and assembling declaration files with minimal load
//! directives.

pub mod core;
pub mod discovery;
pub mod generator;
pub mod printer;
pub mod rules;
pub mod util;

pub use crate::core::{BuildFile, GoPackage, Label};
pub use crate::generator::{Generator, GeneratorConfig};
pub use crate::rules::{LabelResolver, ResolutionError, VendoredResolver};
pub use crate::util::Config;
