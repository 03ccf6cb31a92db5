// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! yak-map CLI - serve and export the yak-shaving map

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yakmap::commands::{self, Workspace};
use yakmap::config;

#[derive(Parser)]
#[command(name = "yak-map")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "YAKMAP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Dataset file replacing the built-in map
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Saved positions file
    #[arg(long, global = true)]
    positions: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true, value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the development server
    Serve {
        /// Listen address
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Do not save dragged positions
        #[arg(long)]
        no_persist: bool,
    },

    /// Export the merged map
    Export {
        /// Output format (dot, json, vis, positions)
        #[arg(short, long, default_value = "vis")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the dataset and saved positions
    Check {
        /// Fail when an edge names a project missing from the map
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions need no configuration
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell, &mut Cli::command());
    }

    let mut config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = Some(dataset);
    }
    if let Some(positions) = cli.positions {
        config.positions_path = positions;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    // Execute command
    match cli.command {
        Commands::Serve { bind, no_persist } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if no_persist {
                config.persist_positions = false;
            }
            commands::serve::run(Workspace::load(config)?)
        }
        Commands::Export { format, output } => {
            commands::export::run(&Workspace::load(config)?, &format, output)
        }
        Commands::Check { strict } => {
            commands::check::run(&Workspace::load(config)?, strict, !cli.no_color)
        }
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
