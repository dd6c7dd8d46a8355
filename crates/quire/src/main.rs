//! quire CLI - documentation site generator.
//!
//! Provides commands for:
//! - `build`: Generate the site into the output directory
//! - `dev`: Build, serve and rebuild on change
//! - `start`: Serve a previously built site
//! - `clean`: Remove the output directory

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CleanArgs, DevArgs, StartArgs};
use error::CliError;
use output::Output;

/// quire - Markdown documentation site generator.
#[derive(Parser, Debug)]
#[command(name = "quire", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the site.
    Build(BuildArgs),
    /// Build, serve and rebuild on change.
    Dev(DevArgs),
    /// Serve the built site.
    Start(StartArgs),
    /// Remove generated output.
    Clean(CleanArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Build(args) => args.execute(),
        Commands::Clean(args) => args.execute(),
        Commands::Dev(args) => tokio::runtime::Runtime::new()?.block_on(args.execute()),
        Commands::Start(args) => tokio::runtime::Runtime::new()?.block_on(args.execute()),
    }
}
