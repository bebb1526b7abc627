//! Extension bridge CLI
//!
//! Diagnostics for the package-manager extension bridge: manifest
//! resolution, staging paths and effective settings.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::FmtSubscriber;

use bridge_core::Verbosity;
use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.debug, cli.verbose >= 2, cli.verbose >= 1);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(verbosity.level_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!(?verbosity, "logging initialised");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Extension bridge CLI", "ext-bridge".green().bold());
            println!();
            println!("Run {} for available commands.", "ext-bridge --help".cyan());
            Ok(true)
        }
    }
}

fn execute_command(cmd: Commands) -> Result<bool> {
    match cmd {
        Commands::Resolve { manifest, json } => commands::run_resolve(&manifest, json),
        Commands::InstallPath { package } => commands::run_install_path(&package),
        Commands::Supports { package_type } => commands::run_supports(&package_type),
        Commands::Settings {
            file,
            composer,
            json,
        } => {
            let cwd = std::env::current_dir()?;
            commands::run_settings(&cwd, file.as_deref(), composer.as_deref(), json)
        }
    }
}
