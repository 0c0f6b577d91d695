//! Bundled in-memory frame engine.
//!
//! Stands in for the distributed dataframe collaborator: columnar storage,
//! lazy casting, and predicate evaluation over [`crate::expr::Expression`]
//! trees. Datasets are immutable once constructed; every operation reads.

mod column;
mod dataset;
mod eval;
mod reader;
mod value;

pub use column::Column;
pub use dataset::{ColumnTarget, RawFrame, TypedFrame};
pub use reader::{read_csv, SourceMetadata};
pub use value::{DataType, Value};
