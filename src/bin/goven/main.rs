//! goven CLI - vendor a Go package into the current project

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};
use goven::util::diagnostic;
use goven::util::Shell;
use goven::GovenError;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("goven=debug")
    } else if cli.quiet {
        EnvFilter::new("goven=error")
    } else {
        EnvFilter::new("goven=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );

    if let Err(e) = run(cli.command, &shell) {
        report(&shell, &e);
        std::process::exit(1);
    }
}

fn run(command: Commands, shell: &Shell) -> Result<()> {
    match command {
        Commands::Vendor(args) => commands::vendor::execute(args, shell),
        Commands::Locate(args) => commands::locate::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(shell: &Shell, e: &anyhow::Error) {
    if shell.is_json() {
        shell.error(format!("{:#}", e));
        return;
    }
    match e.downcast_ref::<GovenError>() {
        Some(err) => diagnostic::emit(&err.to_diagnostic(), shell.use_color()),
        None => eprintln!("error: {:#}", e),
    }
}
