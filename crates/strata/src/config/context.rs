//! Per-job validation context.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::aggregate::AggregateDeclaration;
use super::feature::RawFeature;
use super::source::SourceDeclaration;

/// The immutable configuration for one validation job.
///
/// Constructed once at configuration-load time and passed explicitly to
/// every component; derived artifacts (schemas, checks, indices) are pure
/// functions of this value and the runtime dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Feature definitions keyed by feature name, in declaration order.
    pub raw_features: IndexMap<String, RawFeature>,
    /// Where the data comes from and how its columns bind to features.
    pub source: SourceDeclaration,
    /// Aggregates to compute over the ingested dataset.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aggregates: IndexMap<String, AggregateDeclaration>,
}

impl ValidationContext {
    /// Load a context from a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Look up a feature definition, failing when the reference is dangling.
    pub fn feature(&self, name: &str) -> Result<&RawFeature> {
        self.raw_features
            .get(name)
            .ok_or_else(|| Error::Config(format!("no raw feature definition named '{name}'")))
    }
}
