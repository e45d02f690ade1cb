//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gaze Bridge - Drive a target application's arrow keys with eye gaze
#[derive(Parser, Debug)]
#[command(name = "gaze-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge until interrupted (Ctrl+C)
    Run {
        /// Gaze file path (overrides config)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Follow horizontal gaze position
        #[arg(short = 'x', long)]
        follow_x: bool,

        /// Follow vertical gaze position
        #[arg(short = 'y', long)]
        follow_y: bool,

        /// Log key events instead of injecting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Read the gaze file once and report the outcome
    Check {
        /// Gaze file path (overrides config)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
