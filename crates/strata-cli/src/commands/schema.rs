//! Schema command - print the expected schema for a configuration.

use std::path::PathBuf;

use colored::Colorize;
use strata::{expected_schema, ValidationContext};

pub fn run(
    config: PathBuf,
    json_output: bool,
    _verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let ctx = ValidationContext::from_json_file(&config)?;
    let schema = expected_schema(&ctx)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(true);
    }

    println!("{}", "Expected schema:".cyan().bold());
    for entry in &schema {
        let nullable = if entry.nullable { "nullable" } else { "required" };
        println!(
            "  {} {} ({})",
            entry.name.white().bold(),
            entry.data_type.to_string().yellow(),
            nullable
        );
    }
    Ok(true)
}
