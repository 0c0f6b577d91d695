//! Strata: schema-driven validation and ingestion engine for tabular datasets.
//!
//! Strata derives an expected column schema from a declarative feature
//! configuration, ingests raw records under that schema with strict type
//! enforcement, compiles per-column value constraints into evaluable
//! predicates, and reports per-column violation counts. Aggregations over
//! validated columns dispatch through a pluggable registry.
//!
//! # Core principles
//!
//! - **Declarative**: features, sources, and aggregates are configuration,
//!   loaded once per job into an immutable [`ValidationContext`]
//! - **Violations are data**: constraint failures come back as counts in a
//!   report; only structural, configuration, and type problems are errors
//! - **Expressions are values**: predicates are opaque trees the frame
//!   engine interprets, evaluated lazily at collection time
//!
//! # Example
//!
//! ```no_run
//! use strata::{ingest, read_csv, value_check_data, ValidationContext};
//!
//! let ctx = ValidationContext::from_json_file("job.json").unwrap();
//! let (raw, _meta) = read_csv(&ctx).unwrap();
//! let dataset = ingest(&ctx, raw).unwrap();
//!
//! let report = value_check_data(&ctx, &dataset).unwrap();
//! for (column, violations) in &report {
//!     println!("{column}: {violations:?}");
//! }
//! ```

pub mod aggregate;
pub mod check;
pub mod config;
pub mod error;
pub mod expr;
pub mod frame;
pub mod index;
pub mod ingest;
pub mod schema;
pub mod validate;

pub use aggregate::{run_aggregators, AggregatorRegistry, MemoryResultStore, ResultStore};
pub use check::{value_checks, CheckKind, ColumnCheck};
pub use config::{
    AggregateDeclaration, ColumnRef, FeatureType, RawFeature, SourceDeclaration, ValidationContext,
};
pub use error::{Error, Result};
pub use expr::{col, lit, Expression};
pub use frame::{Column, ColumnTarget, DataType, RawFrame, SourceMetadata, TypedFrame, Value};
pub use index::{column_names_to_index, ColumnIndex};
pub use ingest::{ingest, read_csv};
pub use schema::{expected_schema, schemas_equivalent, SchemaEntry};
pub use validate::{value_check_data, ViolationReport};
