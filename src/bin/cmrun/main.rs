//! cmrun CLI - configure, build and run a CMake project

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI; usage errors exit here before anything runs
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        return commands::completions::execute(shell);
    }

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cmrun=debug")
    } else {
        EnvFilter::new("cmrun=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    commands::run::execute(cli)
}
