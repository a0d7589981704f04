//! Declaration-file generation: configuration, per-directory assembly, and
//! the repository orchestrator.

pub mod assemble;
pub mod config;
pub mod generate;

pub use assemble::Assembler;
pub use config::{GeneratorConfig, DEFAULT_BUILD_FILE_NAME, DEFAULT_RULES_SOURCE};
pub use generate::Generator;
