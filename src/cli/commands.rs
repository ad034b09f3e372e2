//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// destination-kit CLI
#[derive(Parser, Debug)]
#[command(name = "destination-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (JSON or YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Inline settings JSON
    #[arg(long, global = true)]
    pub settings_json: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in destinations
    List,

    /// Show a destination's settings-field schema
    Fields {
        /// Destination slug (e.g. "singlestore")
        #[arg(short, long)]
        destination: String,
    },

    /// Test credentials against the remote API
    Check {
        /// Destination slug
        #[arg(short, long)]
        destination: String,
    },

    /// Deliver a batch of events from a JSON payload file
    Send {
        /// Destination slug
        #[arg(short, long)]
        destination: String,

        /// Payload file: a JSON array of event records
        #[arg(short, long)]
        payload: PathBuf,
    },
}
