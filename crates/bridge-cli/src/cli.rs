//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Extension bridge - inspect how packages map onto CMS extensions
#[derive(Parser, Debug)]
#[command(name = "ext-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v verbose, -vv very verbose)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the element identity of a manifest
    ///
    /// The manifest is read from a TOML or JSON file.
    ///
    /// Examples:
    ///   ext-bridge resolve manifest.toml
    ///   ext-bridge resolve manifest.json --json
    Resolve {
        /// Path to the manifest file
        manifest: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the staging path of a package
    InstallPath {
        /// Package pretty name (vendor/name)
        package: String,
    },

    /// Check whether a package type is handled by the bridge
    Supports {
        /// Package type as declared in the package metadata
        package_type: String,
    },

    /// Show the effective bridge settings and credentials
    Settings {
        /// Settings block stored in a TOML or JSON file
        #[arg(long, conflicts_with = "composer")]
        file: Option<PathBuf>,

        /// Package manager manifest whose `config.joomla` block is used
        #[arg(long)]
        composer: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
