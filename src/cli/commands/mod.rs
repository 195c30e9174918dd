//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod lookup;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use geoproxy::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "geoproxy")]
#[command(about = "Geocoding proxy for Mapbox forward and reverse lookups")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind: port, host, or host:port (defaults to config `bind`)
        bind: Option<String>,
    },

    /// Forward geocode free text
    Locate {
        /// Address or place name
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print the raw feature list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reverse geocode a coordinate pair
    Reverse {
        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        /// Print the raw feature list as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let settings = load_settings(options).await?;
    tracing::debug!("Resolved settings: {:?}", settings);

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Locate { text, json } => {
            lookup::cmd_locate(&settings, &text.join(" "), json).await
        }
        Commands::Reverse { lat, lng, json } => {
            lookup::cmd_reverse(&settings, lat, lng, json).await
        }
    }
}
