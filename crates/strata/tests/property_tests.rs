//! Property-based tests for schema comparison and column indexing.

use indexmap::IndexMap;
use proptest::prelude::*;

use strata::{column_names_to_index, schemas_equivalent, ColumnIndex, ColumnRef, DataType, SchemaEntry};

fn data_type(tag: u8) -> DataType {
    match tag % 3 {
        0 => DataType::Str,
        1 => DataType::Int,
        _ => DataType::Float,
    }
}

fn schema_strategy() -> impl Strategy<Value = Vec<SchemaEntry>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..8).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        (
            Just(names),
            prop::collection::vec((any::<u8>(), any::<bool>()), len),
        )
            .prop_map(|(names, attrs)| {
                names
                    .into_iter()
                    .zip(attrs)
                    .map(|(name, (tag, nullable))| {
                        SchemaEntry::new(name, data_type(tag), nullable)
                    })
                    .collect()
            })
    })
}

fn shuffled_pair() -> impl Strategy<Value = (Vec<SchemaEntry>, Vec<SchemaEntry>)> {
    schema_strategy().prop_flat_map(|entries| {
        let original = entries.clone();
        (Just(original), Just(entries).prop_shuffle())
    })
}

fn references_strategy() -> impl Strategy<Value = IndexMap<String, ColumnRef>> {
    let column_ref = prop_oneof![
        "[a-z]{1,6}".prop_map(ColumnRef::Single),
        prop::collection::vec("[a-z]{1,6}", 1..4).prop_map(ColumnRef::Many),
    ];
    prop::collection::vec(("[a-z]{1,6}", column_ref), 1..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn test_equivalence_survives_permutation((expected, observed) in shuffled_pair()) {
        prop_assert!(schemas_equivalent(&expected, &observed));
    }

    #[test]
    fn test_nullability_flip_breaks_equivalence(
        (entries, seed) in schema_strategy().prop_flat_map(|e| {
            let len = e.len();
            (Just(e), 0..len)
        })
    ) {
        let mut mutated = entries.clone();
        mutated[seed].nullable = !mutated[seed].nullable;
        prop_assert!(!schemas_equivalent(&entries, &mutated));
    }

    #[test]
    fn test_extra_entry_breaks_equivalence(entries in schema_strategy()) {
        let mut longer = entries.clone();
        longer.push(SchemaEntry::new("zz_extra", DataType::Int, true));
        prop_assert!(!schemas_equivalent(&entries, &longer));
    }

    #[test]
    fn test_indexer_output_sorted_and_deterministic(references in references_strategy()) {
        let (names, indexes) = column_names_to_index(&references);

        // The flattened list is sorted, unique, and free of duplicates.
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&names, &sorted);

        // Every index points back at the name it was derived from.
        for (feature, reference) in &references {
            match (reference, indexes.get(feature).unwrap()) {
                (ColumnRef::Single(name), ColumnIndex::Single(i)) => {
                    prop_assert_eq!(&names[*i], name);
                }
                (ColumnRef::Many(list), ColumnIndex::Many(positions)) => {
                    prop_assert_eq!(list.len(), positions.len());
                    for (name, i) in list.iter().zip(positions) {
                        prop_assert_eq!(&names[*i], name);
                    }
                }
                _ => prop_assert!(false, "index shape does not match reference shape"),
            }
        }

        // Re-running the indexer yields the identical mapping.
        let (names_again, indexes_again) = column_names_to_index(&references);
        prop_assert_eq!(names, names_again);
        prop_assert_eq!(indexes, indexes_again);
    }
}
