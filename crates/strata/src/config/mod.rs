//! Declarative job configuration: features, sources, aggregates.

mod aggregate;
mod context;
mod feature;
mod source;

pub use aggregate::{AggregateDeclaration, AggregateInputs, ColumnRef};
pub use context::ValidationContext;
pub use feature::{FeatureType, RawFeature};
pub use source::{ColumnMapping, SourceDeclaration};
