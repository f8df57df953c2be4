mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::handlers;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "twoly-runtime")]
#[command(version)]
#[command(about = "Resolve the identity and operating mode of a 2ly runtime")]
#[command(
    help_template = "{name} - {version}\n{about}\n\n{usage-heading}\n  {usage}\n\n{all-args}{options}\n"
)]
struct Cli {
    /// TOML env file with fallback signal values (default: ~/.config/2ly/runtime.toml)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the runtime mode and identity from the environment
    ///
    /// Exits with a non-zero status and the configuration error when the
    /// signals are inconsistent. Key material is never printed.
    ///
    /// Examples:
    ///   TOOLSET_NAME=filesystem twoly-runtime resolve
    ///   RUNTIME_NAME=edge-1 REMOTE_PORT=3001 twoly-runtime resolve --json
    Resolve {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List recognized signals and where each one is set
    Signals,

    /// Manage the runtime env file
    Config {
        /// Write a commented env file template
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { json } => {
            handlers::handle_resolve(cli.env_file, json)?;
        }
        Commands::Signals => {
            handlers::handle_signals(cli.env_file)?;
        }
        Commands::Config { init } => {
            if init {
                handlers::handle_config_init(cli.env_file)?;
            } else {
                println!("Config command requires --init flag");
                println!("Usage: twoly-runtime config --init [--env-file PATH]");
            }
        }
    }

    Ok(())
}
