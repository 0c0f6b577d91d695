//! Check command - read, ingest, and validate a declared data source.

use std::path::PathBuf;

use colored::Colorize;
use strata::aggregate::IdentityPopulator;
use strata::{
    expected_schema, ingest, read_csv, run_aggregators, schemas_equivalent, value_check_data,
    AggregatorRegistry, MemoryResultStore, ValidationContext,
};

/// Returns `Ok(true)` when the data passed every check, `Ok(false)` when
/// violations were found, and `Err` for structural failures.
pub fn run(
    config: PathBuf,
    json_output: bool,
    no_aggregates: bool,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let ctx = ValidationContext::from_json_file(&config)?;

    let (raw, metadata) = read_csv(&ctx)?;
    if verbose {
        eprintln!(
            "read {} ({} rows, {} columns, {})",
            metadata.path.display(),
            metadata.row_count,
            metadata.column_count,
            metadata.hash
        );
    }

    let dataset = ingest(&ctx, raw)?;

    // Structural check before value checks: a shape mismatch makes the
    // per-column counts meaningless.
    let expected = expected_schema(&ctx)?;
    let observed = dataset.schema();
    if !schemas_equivalent(&expected, &observed) {
        return Err(format!(
            "schema mismatch: expected {}, observed {}",
            serde_json::to_string(&expected)?,
            serde_json::to_string(&observed)?
        )
        .into());
    }

    let report = value_check_data(&ctx, &dataset)?;

    let mut store = MemoryResultStore::new();
    if !no_aggregates && !ctx.aggregates.is_empty() {
        let aggregates: Vec<_> = ctx.aggregates.values().cloned().collect();
        run_aggregators(
            &aggregates,
            &dataset,
            AggregatorRegistry::builtin(),
            &IdentityPopulator,
            &mut store,
        )?;
    }

    if json_output {
        let mut aggregates = serde_json::Map::new();
        for (value, decl) in store.results() {
            aggregates.insert(decl.name.clone(), serde_json::to_value(value)?);
        }
        let output = serde_json::json!({
            "source": metadata,
            "violations": report,
            "aggregates": aggregates,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(report.is_empty());
    }

    if report.is_empty() {
        println!(
            "{} {} rows, no violations",
            "OK".green().bold(),
            dataset.count()
        );
    } else {
        println!("{}", "Violations:".red().bold());
        for (column, violations) in &report {
            for (condition, count) in violations {
                println!(
                    "  {}: {} row(s) failed {}",
                    column.white().bold(),
                    count.to_string().red(),
                    condition.yellow()
                );
            }
        }
    }

    for (value, decl) in store.results() {
        let rendered = match value {
            Some(v) => v.to_string(),
            None => "null".to_string(),
        };
        println!("  {} = {}", decl.name.cyan(), rendered.white());
    }

    Ok(report.is_empty())
}
