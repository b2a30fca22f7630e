// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! transbench CLI
//!
//! Command-line interface for the transformation benchmark harness.

use clap::{Parser, Subcommand};

mod commands;

/// transbench - Compare source transformation backends on a fixed workload
#[derive(Parser)]
#[command(name = "transbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./transbench.yaml when present,
    /// otherwise the built-in backend set)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured backends
    List,

    /// Resolve every backend and report which ones would be benchmarked
    Check {
        /// Call each loaded backend once on the workload
        #[arg(short, long)]
        invoke: bool,

        /// Exit with an error if any backend was skipped or failed
        #[arg(short, long)]
        strict: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },

    /// Show the fixed workload
    Workload {
        /// Print the raw source instead of a summary
        #[arg(long)]
        raw: bool,
    },

    /// Run the suite under criterion
    Run {
        /// Only run benchmarks whose id matches this regex
        #[arg(short, long)]
        filter: Option<String>,

        /// Minimal sampling for a fast, rough comparison
        #[arg(short, long)]
        quick: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::List => commands::list::execute(cli.config.as_deref()),
        Commands::Check { invoke, strict } => {
            commands::check::execute(cli.config.as_deref(), invoke, strict)
        }
        Commands::Validate { file } => commands::validate::execute(&file),
        Commands::Workload { raw } => commands::workload::execute(raw),
        Commands::Run { filter, quick } => {
            commands::run::execute(cli.config.as_deref(), filter.as_deref(), quick)
        }
    }
}
