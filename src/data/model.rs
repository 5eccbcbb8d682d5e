use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell in a dataset column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value covering the column types found in the
/// Pokémon dataset (and tabular CSV exports in general).
/// Using `BTreeMap` / `BTreeSet` downstream so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// An absent or empty cell. Grouping by a column a record lacks puts
    /// that record in the `Null` bucket instead of raising an error.
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<none>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single dataset row: column name → cell value. Immutable after loading.
pub type Record = BTreeMap<String, FieldValue>;

/// Read a record's value for a column, with missing cells folded into
/// [`FieldValue::Null`].
pub fn field_of(record: &Record, field: &str) -> FieldValue {
    record.get(field).cloned().unwrap_or(FieldValue::Null)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
/// Record order is source-file order; it carries no meaning beyond keeping
/// grouping stable.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// Ordered list of column names.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in rec {
                column_names_set.insert(col.clone());
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        let column_names: Vec<String> = column_names_set.into_iter().collect();
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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

    #[test]
    fn from_records_collects_columns_and_uniques() {
        let ds = Dataset::from_records(vec![
            rec(&[
                ("type1", FieldValue::String("ghost".into())),
                ("generation", FieldValue::Integer(1)),
            ]),
            rec(&[
                ("type1", FieldValue::String("fire".into())),
                ("generation", FieldValue::Integer(1)),
            ]),
        ]);

        assert_eq!(ds.column_names, vec!["generation", "type1"]);
        assert_eq!(ds.unique_values["generation"].len(), 1);
        assert_eq!(ds.unique_values["type1"].len(), 2);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn field_of_missing_column_is_null() {
        let r = rec(&[("type1", FieldValue::String("ghost".into()))]);
        assert_eq!(field_of(&r, "type2"), FieldValue::Null);
    }

    #[test]
    fn ordering_is_total_across_variants() {
        let mut vals = vec![
            FieldValue::String("a".into()),
            FieldValue::Integer(3),
            FieldValue::Null,
            FieldValue::Float(1.5),
        ];
        vals.sort();
        assert_eq!(vals[0], FieldValue::Null);
        assert_eq!(vals[3], FieldValue::String("a".into()));
    }
}
