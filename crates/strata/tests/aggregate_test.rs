//! Aggregate dispatch tests: registry resolution, argument population and
//! validation, and result storage.

use indexmap::IndexMap;
use serde_json::Value as Json;

use strata::aggregate::{run_aggregators, ArgPopulator, AggregatorRegistry, MemoryResultStore};
use strata::config::{AggregateDeclaration, AggregateInputs, ColumnRef};
use strata::{Column, ColumnTarget, DataType, Error, RawFrame, Result, TypedFrame, Value};

fn frame() -> TypedFrame {
    let mut columns = IndexMap::new();
    columns.insert("a".to_string(), Column::int(vec![None, Some(1), Some(2), Some(3)]));
    let mut target = IndexMap::new();
    target.insert("a".to_string(), ColumnTarget::new(DataType::Int, true));
    TypedFrame::new(RawFrame::from_columns(columns).unwrap(), target).unwrap()
}

fn declaration(name: &str, aggregator: &str, args: IndexMap<String, Json>) -> AggregateDeclaration {
    let mut features = IndexMap::new();
    features.insert("col".to_string(), ColumnRef::Single("a".to_string()));
    AggregateDeclaration {
        name: name.to_string(),
        id: "-".to_string(),
        aggregator: aggregator.to_string(),
        inputs: AggregateInputs { features, args },
    }
}

/// Populator that resolves the constant reference `"some_constant"` to
/// `true`, leaving every other argument untouched.
struct ConstantPopulator;

impl ArgPopulator for ConstantPopulator {
    fn populate_args(&self, raw: &IndexMap<String, Json>) -> Result<IndexMap<String, Json>> {
        Ok(raw
            .iter()
            .map(|(name, value)| {
                let resolved = match value {
                    Json::String(s) if s == "some_constant" => Json::Bool(true),
                    other => other.clone(),
                };
                (name.clone(), resolved)
            })
            .collect())
    }
}

#[test]
fn test_run_aggregators_computes_and_stores() {
    let mut args = IndexMap::new();
    args.insert("ignorenulls".to_string(), Json::String("some_constant".to_string()));

    let aggregates = vec![
        declaration("sum_a", "strata.sum", IndexMap::new()),
        declaration("first_a", "strata.first", args),
    ];

    let registry = AggregatorRegistry::builtin();
    let mut store = MemoryResultStore::new();
    run_aggregators(
        &aggregates,
        &frame(),
        registry,
        &ConstantPopulator,
        &mut store,
    )
    .unwrap();

    assert_eq!(store.results().len(), 2);
    assert_eq!(store.get("sum_a"), Some(&Some(Value::Int(6))));
    assert_eq!(store.get("first_a"), Some(&Some(Value::Int(1))));
}

#[test]
fn test_run_aggregators_rejects_unknown_argument() {
    // Argument names are exact: "ignoreNulls" is not "ignorenulls".
    let mut args = IndexMap::new();
    args.insert("ignoreNulls".to_string(), Json::Bool(true));
    let aggregates = vec![declaration("first_a", "strata.first", args)];

    let registry = AggregatorRegistry::builtin();
    let mut store = MemoryResultStore::new();
    let err = run_aggregators(
        &aggregates,
        &frame(),
        registry,
        &ConstantPopulator,
        &mut store,
    )
    .unwrap_err();

    match err {
        Error::Argument { aggregate, .. } => assert_eq!(aggregate, "first_a"),
        other => panic!("expected argument error, got {other:?}"),
    }
    // Nothing is stored for a declaration that failed validation.
    assert!(store.results().is_empty());
}

#[test]
fn test_run_aggregators_unknown_aggregator() {
    let aggregates = vec![declaration("sum_a", "strata.not_a_thing", IndexMap::new())];

    let registry = AggregatorRegistry::builtin();
    let mut store = MemoryResultStore::new();
    assert!(matches!(
        run_aggregators(
            &aggregates,
            &frame(),
            registry,
            &ConstantPopulator,
            &mut store,
        ),
        Err(Error::UnknownAggregator(_))
    ));
    assert!(store.results().is_empty());
}

#[test]
fn test_run_aggregators_halts_on_first_failure() {
    let mut bad_args = IndexMap::new();
    bad_args.insert("ignoreNulls".to_string(), Json::Bool(true));

    let aggregates = vec![
        declaration("sum_a", "strata.sum", IndexMap::new()),
        declaration("first_a", "strata.first", bad_args),
        declaration("count_a", "strata.count", IndexMap::new()),
    ];

    let registry = AggregatorRegistry::builtin();
    let mut store = MemoryResultStore::new();
    assert!(run_aggregators(
        &aggregates,
        &frame(),
        registry,
        &ConstantPopulator,
        &mut store,
    )
    .is_err());

    // The first declaration completed; the failure stopped the rest.
    assert_eq!(store.results().len(), 1);
    assert_eq!(store.get("sum_a"), Some(&Some(Value::Int(6))));
    assert_eq!(store.get("count_a"), None);
}
