//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Gantry - a Bazel BUILD file generator for Go repositories
#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate BUILD files for packages under the given directories
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Directories to generate for (defaults to the repository root)
    pub dirs: Vec<PathBuf>,

    /// Import-path prefix of the repository (e.g. example.com/proj)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Repository root directory
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Name of the generated files (e.g. BUILD or BUILD.bazel)
    #[arg(long)]
    pub build_name: Option<String>,

    /// What to do with the generated files
    #[arg(long, value_enum, default_value_t = Mode::Write)]
    pub mode: Mode,

    /// Extra build tags considered true (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Treat the repository root as a GOPATH source root
    #[arg(long)]
    pub gopath_layout: bool,
}

/// What `gantry generate` does with its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Print generated files to stdout
    Print,

    /// Write generated files into the repository
    Write,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
