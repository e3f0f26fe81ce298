use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Skylift - static-asset deploy orchestrator
#[derive(Parser, Debug)]
#[command(name = "skylift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy built artifacts to an environment
    Deploy {
        /// Path to the build output directory
        #[arg(short, long, default_value = "dist")]
        artifacts: PathBuf,

        /// Target environment (defaults to the configured default)
        #[arg(short, long)]
        env: Option<String>,

        /// Path to skylift.toml (defaults to ./skylift.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show what would be done without touching the store or CDN
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Do not wait for CDN invalidation to propagate
        #[arg(long)]
        no_verify: bool,

        /// Concurrent object transfers
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Preview the deploy plan without writing
    Plan {
        /// Path to the build output directory
        #[arg(short, long, default_value = "dist")]
        artifacts: PathBuf,

        /// Target environment (defaults to the configured default)
        #[arg(short, long)]
        env: Option<String>,

        /// Path to skylift.toml (defaults to ./skylift.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the last-known published state of an environment
    Status {
        /// Target environment (defaults to the configured default)
        #[arg(short, long)]
        env: Option<String>,

        /// Path to skylift.toml (defaults to ./skylift.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate the configuration
    Check {
        /// Path to skylift.toml (defaults to ./skylift.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
