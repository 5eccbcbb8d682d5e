use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{field_of, FieldValue, Record};

// ---------------------------------------------------------------------------
// CoordinatePair – one bar of a chart
// ---------------------------------------------------------------------------

/// A labelled count, the only thing the plot layer consumes. Built fresh on
/// every chart rebuild and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatePair {
    /// Category label shown on the x axis.
    pub x: String,
    /// Number of records behind the bar.
    pub y: u64,
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition records by the value of one column.
///
/// Records keep their relative (first-seen) order within each group.
/// Records missing the column, or holding an empty cell, land under the
/// [`FieldValue::Null`] key rather than being dropped or erroring.
///
/// `BTreeMap` makes key iteration sorted and deterministic, but callers
/// wanting a particular chart order (e.g. ascending by count) still sort
/// the mapped output themselves.
pub fn group_by_field<'a, I>(records: I, field: &str) -> BTreeMap<FieldValue, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<FieldValue, Vec<&'a Record>> = BTreeMap::new();
    for rec in records {
        groups.entry(field_of(rec, field)).or_default().push(rec);
    }
    groups
}

// ---------------------------------------------------------------------------
// Aggregation mappers
// ---------------------------------------------------------------------------

/// Map each group to a `(label, count)` pair, in the map's key order.
///
/// Groups only ever come out of [`group_by_field`] with at least one record,
/// so empty groups need no handling. Every record in a group agreeing with
/// the key on the grouping field is an invariant of the grouping step; it
/// is re-checked here in debug builds.
pub fn count_coordinates(
    groups: &BTreeMap<FieldValue, Vec<&Record>>,
    field: &str,
) -> Vec<CoordinatePair> {
    groups
        .iter()
        .map(|(key, members)| {
            debug_assert!(
                members.iter().all(|r| field_of(r, field) == *key),
                "group for {field}={key} contains a record with a different value"
            );
            CoordinatePair {
                x: key.to_string(),
                y: members.len() as u64,
            }
        })
        .collect()
}

/// Map type-name groups to `(label, count)` pairs with the label's first
/// character upper-cased (`"ghost"` → `"Ghost"`; the rest of the string is
/// left alone). Output keeps the map's key order; pass it through
/// [`sort_by_count`] for the count-sorted chart.
pub fn type_coordinates(groups: &BTreeMap<FieldValue, Vec<&Record>>) -> Vec<CoordinatePair> {
    groups
        .iter()
        .map(|(key, members)| CoordinatePair {
            x: capitalize_first(&key.to_string()),
            y: members.len() as u64,
        })
        .collect()
}

/// Stable ascending sort by count.
pub fn sort_by_count(pairs: &mut [CoordinatePair]) {
    pairs.sort_by_key(|p| p.y);
}

/// Upper-case only the first character; everything after it is untouched.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, FieldValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn ghost(gen: i64) -> Record {
        rec(&[
            ("type1", FieldValue::String("ghost".into())),
            ("generation", FieldValue::Integer(gen)),
        ])
    }

    #[test]
    fn grouping_partitions_without_losing_records() {
        let records = vec![ghost(1), ghost(2), ghost(1), ghost(3)];
        let groups = group_by_field(&records, "generation");

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, records.len());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&FieldValue::Integer(1)].len(), 2);
    }

    #[test]
    fn group_members_all_share_the_key() {
        let records = vec![ghost(1), ghost(2), ghost(1)];
        let groups = group_by_field(&records, "generation");
        for (key, members) in &groups {
            for r in members {
                assert_eq!(field_of(r, "generation"), *key);
            }
        }
    }

    #[test]
    fn grouping_preserves_first_seen_order_within_groups() {
        let a = rec(&[
            ("name", FieldValue::String("gastly".into())),
            ("generation", FieldValue::Integer(1)),
        ]);
        let b = rec(&[
            ("name", FieldValue::String("haunter".into())),
            ("generation", FieldValue::Integer(1)),
        ]);
        let records = vec![a.clone(), ghost(2), b.clone()];
        let groups = group_by_field(&records, "generation");

        let gen1 = &groups[&FieldValue::Integer(1)];
        assert_eq!(gen1[0]["name"], FieldValue::String("gastly".into()));
        assert_eq!(gen1[1]["name"], FieldValue::String("haunter".into()));
    }

    #[test]
    fn missing_field_groups_under_null() {
        let with_type2 = rec(&[("type2", FieldValue::String("poison".into()))]);
        let without = rec(&[("type1", FieldValue::String("fire".into()))]);
        let records = vec![with_type2, without];

        let groups = group_by_field(&records, "type2");
        assert_eq!(groups[&FieldValue::Null].len(), 1);
        assert_eq!(groups[&FieldValue::String("poison".into())].len(), 1);
    }

    #[test]
    fn count_coordinates_one_pair_per_distinct_key() {
        let records = vec![ghost(1), ghost(1), ghost(2)];
        let groups = group_by_field(&records, "generation");
        let coords = count_coordinates(&groups, "generation");

        assert_eq!(coords.len(), groups.len());
        assert_eq!(
            coords,
            vec![
                CoordinatePair { x: "1".into(), y: 2 },
                CoordinatePair { x: "2".into(), y: 1 },
            ]
        );
    }

    #[test]
    fn capitalization_touches_only_the_first_character() {
        assert_eq!(capitalize_first("ghost"), "Ghost");
        assert_eq!(capitalize_first("bug"), "Bug");
        assert_eq!(capitalize_first("mr. mime"), "Mr. mime");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn type_coordinates_capitalizes_labels() {
        let records = vec![
            rec(&[("type1", FieldValue::String("ghost".into()))]),
            rec(&[("type1", FieldValue::String("bug".into()))]),
            rec(&[("type1", FieldValue::String("ghost".into()))]),
        ];
        let groups = group_by_field(&records, "type1");
        let coords = type_coordinates(&groups);

        assert_eq!(
            coords,
            vec![
                CoordinatePair { x: "Bug".into(), y: 1 },
                CoordinatePair { x: "Ghost".into(), y: 2 },
            ]
        );
    }

    #[test]
    fn sort_by_count_is_stable_and_ascending() {
        let mut coords = vec![
            CoordinatePair { x: "Water".into(), y: 3 },
            CoordinatePair { x: "Ghost".into(), y: 1 },
            CoordinatePair { x: "Bug".into(), y: 3 },
            CoordinatePair { x: "Fire".into(), y: 2 },
        ];
        sort_by_count(&mut coords);

        for pair in coords.windows(2) {
            assert!(pair[0].y <= pair[1].y);
        }
        // Equal counts keep their original relative order.
        assert_eq!(coords[2].x, "Water");
        assert_eq!(coords[3].x, "Bug");
    }

    #[test]
    fn end_to_end_ghost_by_generation() {
        let records = vec![
            ghost(1),
            ghost(1),
            rec(&[
                ("type1", FieldValue::String("fire".into())),
                ("generation", FieldValue::Integer(1)),
            ]),
        ];
        let ghosts: Vec<&Record> = records
            .iter()
            .filter(|r| field_of(r, "type1") == FieldValue::String("ghost".into()))
            .collect();

        let groups = group_by_field(ghosts, "generation");
        let coords = count_coordinates(&groups, "generation");
        assert_eq!(coords, vec![CoordinatePair { x: "1".into(), y: 2 }]);
    }

    #[test]
    fn empty_dataset_yields_empty_coordinates() {
        let records: Vec<Record> = Vec::new();
        let groups = group_by_field(&records, "type1");
        assert!(count_coordinates(&groups, "type1").is_empty());
        assert!(type_coordinates(&groups).is_empty());
    }
}
