//! Flattening of nested column references to dense positions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ColumnRef;

/// Positional mirror of a [`ColumnRef`]: a scalar reference becomes one
/// index, a list reference a list of indices of the same length and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnIndex {
    Single(usize),
    Many(Vec<usize>),
}

/// Flatten heterogeneous column references into a deduplicated column list
/// plus a map from each reference to dense integer positions.
///
/// The unique column list is lexicographically sorted, so positions are
/// reproducible regardless of how the input map was assembled. Duplicates
/// inside a list reference are preserved at the index level; only the
/// unique-name output is deduplicated. Empty input yields empty outputs.
pub fn column_names_to_index(
    features: &IndexMap<String, ColumnRef>,
) -> (Vec<String>, IndexMap<String, ColumnIndex>) {
    let mut names: Vec<String> = Vec::new();
    for reference in features.values() {
        match reference {
            ColumnRef::Single(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            ColumnRef::Many(list) => {
                for name in list {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
            }
        }
    }
    names.sort();

    let positions: IndexMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut index_map = IndexMap::new();
    for (key, reference) in features {
        let index = match reference {
            ColumnRef::Single(name) => ColumnIndex::Single(positions[name.as_str()]),
            ColumnRef::Many(list) => {
                ColumnIndex::Many(list.iter().map(|name| positions[name.as_str()]).collect())
            }
        };
        index_map.insert(key.clone(), index);
    }

    (names, index_map)
}
