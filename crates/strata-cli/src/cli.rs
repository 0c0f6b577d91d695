//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strata: schema-driven dataset validation
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a declared data source and report violations
    Check {
        /// Path to the job configuration (JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Output the violation report as JSON
        #[arg(long)]
        json: bool,

        /// Skip the declared aggregates
        #[arg(long)]
        no_aggregates: bool,
    },

    /// Print the expected schema derived from a configuration
    Schema {
        /// Path to the job configuration (JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Output the schema as JSON
        #[arg(long)]
        json: bool,
    },
}
