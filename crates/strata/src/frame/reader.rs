//! CSV source reading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

use super::column::Column;
use super::dataset::RawFrame;

/// Metadata about a source file that has been read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

/// Read a headerless CSV file under a declared column list.
///
/// Every column is read as a string column; empty cells are nulls. Casting
/// to declared semantic types happens later, at collection time.
pub fn read_csv(path: impl AsRef<Path>, schema: &[String]) -> Result<(RawFrame, SourceMetadata)> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let hash = format!("sha256:{:x}", hasher.finalize());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_slice());

    let mut cells: Vec<Vec<Option<&str>>> = vec![Vec::new(); schema.len()];
    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }
    for (row_idx, record) in records.iter().enumerate() {
        if record.len() != schema.len() {
            return Err(Error::Config(format!(
                "row {} has {} fields, declared schema has {}",
                row_idx + 1,
                record.len(),
                schema.len()
            )));
        }
        for (col_idx, field) in record.iter().enumerate() {
            cells[col_idx].push(if field.is_empty() { None } else { Some(field) });
        }
    }

    let mut columns = IndexMap::new();
    for (name, values) in schema.iter().zip(cells) {
        columns.insert(name.clone(), Column::str(values));
    }
    let frame = RawFrame::from_columns(columns)?;

    let metadata = SourceMetadata {
        path: path.to_path_buf(),
        hash,
        size_bytes: contents.len() as u64,
        row_count: frame.row_count(),
        column_count: schema.len(),
        read_at: Utc::now(),
    };

    Ok((frame, metadata))
}
