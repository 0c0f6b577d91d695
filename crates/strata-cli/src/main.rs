//! Strata CLI - schema-driven dataset validation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            config,
            json,
            no_aggregates,
        } => commands::check::run(config, json, no_aggregates, cli.verbose),

        Commands::Schema { config, json } => commands::schema::run(config, json, cli.verbose),
    };

    match result {
        Ok(true) => {}
        // Completed, but the data failed validation.
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
