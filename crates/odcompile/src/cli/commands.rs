//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// odcompile - compile and run DM code on an OpenDream listener from Discord
#[derive(Parser, Debug)]
#[command(name = "odcompile")]
#[command(about = "Compile and run DM code on an OpenDream listener from Discord", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Settings file to use instead of ./odcompile.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve compile commands
    Run {
        /// Discord bot token
        #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Compile a local DM file on the configured listener
    Compile {
        /// Path to the DM source file
        file: PathBuf,

        /// Use the Debug build configuration
        #[arg(long)]
        debug: bool,

        /// Ask for the raw execution output
        #[arg(long)]
        no_parsing: bool,

        /// Extra compiler argument, repeatable (e.g. --arg=--version=515.1)
        #[arg(long = "arg", value_name = "FLAG", allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Store a new listener base URL
    SetListener {
        /// Listener base URL, e.g. http://localhost:5000
        url: String,
    },

    /// Show the stored listener URL and config version
    ShowConfig,
}
