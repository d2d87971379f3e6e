//! Kino Embed CLI - Player configuration inspector
//!
//! Features:
//! - Widget options synthesis from a props file
//! - Public id resolution for ids and delivery URLs
//! - Widget asset locations for a player id

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// Kino Embed CLI - Embedded video player toolkit
#[derive(Parser)]
#[command(name = "kino-embed")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Inspect embedded video player configurations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the widget options for a props file
    Config {
        /// Path to a JSON file with player props
        props: PathBuf,

        /// Cloud name (overrides environment)
        #[arg(long)]
        cloud_name: Option<String>,

        /// Custom secure distribution host
        #[arg(long)]
        secure_distribution: Option<String>,

        /// Serve from a private CDN
        #[arg(long)]
        private_cdn: bool,
    },

    /// Resolve the public id of an id or delivery URL
    Resolve {
        /// Public id or delivery URL
        src: String,
    },

    /// Show the widget script and stylesheet for a player
    Assets {
        /// Player id
        #[arg(short, long, default_value = "player")]
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    let format = output::OutputFormat::from(cli.format.as_str());

    match cli.command {
        Commands::Config { props, cloud_name, secure_distribution, private_cdn } => {
            let overrides = commands::AccountOverrides {
                cloud_name,
                secure_distribution,
                private_cdn,
            };
            commands::config(&props, overrides, format)?;
        }
        Commands::Resolve { src } => {
            commands::resolve(&src, format)?;
        }
        Commands::Assets { id } => {
            commands::assets(&id, format)?;
        }
    }

    Ok(())
}
