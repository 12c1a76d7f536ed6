//! CLI definitions using clap.

use std::ffi::OsString;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use goven::util::shell::ColorChoice;
use goven::PackageId;

/// goven - vendor a Go package into the current project and rewrite its imports
#[derive(Parser)]
#[command(name = "goven")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log each step as it happens
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to use colors: auto, always or never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for status and results
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy a package from GOPATH into the current tree and rewrite its imports
    Vendor(VendorArgs),

    /// Show where a package comes from and the import path it would get
    Locate(LocateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct VendorArgs {
    /// Import path of the package (e.g., github.com/bmizerany/pat)
    pub package: PackageId,

    /// Don't copy the package, only rewrite imports
    #[arg(long)]
    pub no_copy: bool,

    /// Don't rewrite imports, only copy the package
    #[arg(long)]
    pub no_rewrite: bool,

    /// Subdirectory to put the package in (e.g., third_party)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Don't run the formatter after rewriting
    #[arg(long)]
    pub no_format: bool,

    /// Number of parallel rewrite jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Workspace roots to search, overriding the environment
    #[arg(long, env = "GOPATH")]
    pub gopath: Option<OsString>,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Import path of the package
    pub package: PackageId,

    /// Subdirectory the package would be vendored into
    #[arg(long)]
    pub prefix: Option<String>,

    /// Workspace roots to search, overriding the environment
    #[arg(long, env = "GOPATH")]
    pub gopath: Option<OsString>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
