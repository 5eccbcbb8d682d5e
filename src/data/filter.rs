use super::model::{field_of, Dataset, FieldValue, Record};

// ---------------------------------------------------------------------------
// Exact-match filter predicate
// ---------------------------------------------------------------------------

/// A single `column == value` constraint, e.g. `type1 == "ghost"`.
/// `None` in the state means "no filter" (all records pass).
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: FieldValue,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: FieldValue) -> Self {
        Filter {
            field: field.into(),
            value,
        }
    }

    /// Exact equality on the record's value for the filter column.
    /// A record missing the column compares as [`FieldValue::Null`].
    pub fn matches(&self, record: &Record) -> bool {
        field_of(record, &self.field) == self.value
    }
}

/// Return indices of records that pass the filter, in dataset order.
/// With no filter every index passes; a filter matching nothing yields an
/// empty list, which downstream mappers turn into an empty chart.
pub fn filtered_indices(dataset: &Dataset, filter: Option<&Filter>) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.is_none_or(|f| f.matches(rec)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let mk = |t1: &str, gen: i64| {
            [
                ("type1".to_string(), FieldValue::String(t1.into())),
                ("generation".to_string(), FieldValue::Integer(gen)),
            ]
            .into_iter()
            .collect::<Record>()
        };
        Dataset::from_records(vec![mk("ghost", 1), mk("fire", 1), mk("ghost", 2)])
    }

    #[test]
    fn exact_match_selects_the_right_rows() {
        let ds = dataset();
        let f = Filter::new("type1", FieldValue::String("ghost".into()));
        assert_eq!(filtered_indices(&ds, Some(&f)), vec![0, 2]);
    }

    #[test]
    fn no_filter_passes_everything() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, None), vec![0, 1, 2]);
    }

    #[test]
    fn no_matches_yields_empty_indices() {
        let ds = dataset();
        let f = Filter::new("type1", FieldValue::String("dragon".into()));
        assert!(filtered_indices(&ds, Some(&f)).is_empty());
    }

    #[test]
    fn missing_column_matches_null_filter() {
        let ds = dataset();
        let f = Filter::new("type2", FieldValue::Null);
        assert_eq!(filtered_indices(&ds, Some(&f)).len(), 3);
    }
}
