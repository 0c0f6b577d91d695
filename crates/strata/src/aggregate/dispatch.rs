//! Aggregate dispatch: resolve, validate, compute, store.

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::config::AggregateDeclaration;
use crate::error::{Error, Result};
use crate::frame::{Column, TypedFrame, Value};
use crate::index::column_names_to_index;

use super::registry::{validate_args, AggregatorRegistry};

/// Collaborator that resolves raw argument literals (constants, references)
/// into concrete values before validation.
pub trait ArgPopulator {
    fn populate_args(&self, raw: &IndexMap<String, Json>) -> Result<IndexMap<String, Json>>;
}

/// Populator that passes raw arguments through unchanged.
#[derive(Debug, Default)]
pub struct IdentityPopulator;

impl ArgPopulator for IdentityPopulator {
    fn populate_args(&self, raw: &IndexMap<String, Json>) -> Result<IndexMap<String, Json>> {
        Ok(raw.clone())
    }
}

/// Collaborator that persists one scalar result per aggregate declaration.
pub trait ResultStore {
    fn store_aggregate_result(
        &mut self,
        value: Option<Value>,
        declaration: &AggregateDeclaration,
    ) -> Result<()>;
}

/// In-memory result store, keyed by declaration name.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: Vec<(Option<Value>, AggregateDeclaration)>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[(Option<Value>, AggregateDeclaration)] {
        &self.results
    }

    /// Stored value for a declaration name, when one was stored.
    pub fn get(&self, name: &str) -> Option<&Option<Value>> {
        self.results
            .iter()
            .find(|(_, decl)| decl.name == name)
            .map(|(value, _)| value)
    }
}

impl ResultStore for MemoryResultStore {
    fn store_aggregate_result(
        &mut self,
        value: Option<Value>,
        declaration: &AggregateDeclaration,
    ) -> Result<()> {
        self.results.push((value, declaration.clone()));
        Ok(())
    }
}

/// Run every aggregate declaration against the dataset.
///
/// Per declaration: resolve the registry reference, populate and validate
/// arguments, compute, then store. Argument validation failures propagate
/// before any computation, so nothing is ever stored for a declaration
/// that failed. Processing halts on the first failing declaration.
pub fn run_aggregators(
    aggregates: &[AggregateDeclaration],
    frame: &TypedFrame,
    registry: &AggregatorRegistry,
    populator: &dyn ArgPopulator,
    store: &mut dyn ResultStore,
) -> Result<()> {
    for declaration in aggregates {
        let aggregator = registry.resolve(&declaration.aggregator)?;

        let populated = populator.populate_args(&declaration.inputs.args)?;
        let args = validate_args(aggregator.arg_spec(), &populated, &declaration.name)?;

        let (column_names, _) = column_names_to_index(&declaration.inputs.features);
        if column_names.len() != aggregator.input_arity() {
            return Err(Error::Config(format!(
                "aggregate '{}' declares {} input column(s), implementation expects {}",
                declaration.name,
                column_names.len(),
                aggregator.input_arity()
            )));
        }
        let columns: Vec<Column> = column_names
            .iter()
            .map(|name| frame.column(name))
            .collect::<Result<_>>()?;

        let value = aggregator.compute(&columns, &args)?;
        store.store_aggregate_result(value, declaration)?;
    }
    Ok(())
}
