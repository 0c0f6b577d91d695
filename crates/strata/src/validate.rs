//! Validation engine: count violation rows per compiled check.

use indexmap::IndexMap;

use crate::check::value_checks;
use crate::config::ValidationContext;
use crate::error::{Error, Result};
use crate::frame::TypedFrame;

/// Violation counts keyed by column name.
///
/// Each entry lists `(satisfaction predicate description, violation count)`
/// pairs with count >= 1; columns without violations are absent. Entries
/// follow feature declaration order, so serializing the report for an
/// unchanged dataset is byte-for-byte reproducible.
pub type ViolationReport = IndexMap<String, Vec<(String, u64)>>;

/// Run every compiled check against the ingested dataset.
///
/// A feature whose column is missing from the dataset is a configuration
/// inconsistency and fails loudly rather than being skipped. Well-formed
/// checks themselves never error: violations are data, not errors.
pub fn value_check_data(ctx: &ValidationContext, frame: &TypedFrame) -> Result<ViolationReport> {
    let mut report = ViolationReport::new();

    for (name, feature) in &ctx.raw_features {
        if !frame.has_column(name) {
            return Err(Error::Config(format!(
                "feature '{name}' references a column missing from the dataset"
            )));
        }

        for check in value_checks(feature) {
            let count = frame.count_where(&check.violation)?;
            if count > 0 {
                report
                    .entry(name.clone())
                    .or_default()
                    .push((check.satisfaction.to_string(), count));
            }
        }
    }

    Ok(report)
}
