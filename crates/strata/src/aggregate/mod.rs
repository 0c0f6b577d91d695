//! Registry-dispatched aggregations over validated columns.

mod builtins;
mod dispatch;
mod registry;

pub use dispatch::{
    run_aggregators, ArgPopulator, IdentityPopulator, MemoryResultStore, ResultStore,
};
pub use registry::{validate_args, AggregatorRegistry, Aggregator, ArgSpec, ArgType};
