use crate::color::ColorMap;
use crate::data::aggregate::{
    count_coordinates, group_by_field, sort_by_count, type_coordinates, CoordinatePair,
};
use crate::data::filter::{filtered_indices, Filter};
use crate::data::model::{Dataset, Record};

/// Primary / secondary type columns of the Kaggle Pokémon export.
pub const PRIMARY_TYPE: &str = "type1";
pub const SECONDARY_TYPE: &str = "type2";

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Record count per distinct value of a chosen column.
    CountByColumn,
    /// Primary-type counts, capitalized labels, sorted ascending by count.
    TypeDistribution,
    /// Primary and secondary type counts stacked per type.
    StackedTypes,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::CountByColumn,
        ChartKind::TypeDistribution,
        ChartKind::StackedTypes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::CountByColumn => "Count by column",
            ChartKind::TypeDistribution => "Type distribution",
            ChartKind::StackedTypes => "Stacked types",
        }
    }
}

/// One bar series; stacked charts carry two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub coords: Vec<CoordinatePair>,
}

/// Everything the plot layer needs to draw, rebuilt from scratch on every
/// dataset / filter / selection change.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub title: String,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Series name → coordinates, the shape used for JSON export.
    pub fn series_coords(&self) -> std::collections::BTreeMap<&str, &[CoordinatePair]> {
        self.series
            .iter()
            .map(|s| (s.name.as_str(), s.coords.as_slice()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Active chart.
    pub chart_kind: Option<ChartKind>,

    /// Group-by column for [`ChartKind::CountByColumn`].
    pub group_column: Option<String>,

    /// Optional `column == value` filter applied before grouping.
    pub filter: Option<Filter>,

    /// Chart-ready coordinates, recomputed on every change.
    pub chart: ChartData,

    /// Bar label → colour, matching the current chart.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and pick sensible chart defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.group_column = if dataset.column_names.iter().any(|c| c == "generation") {
            Some("generation".to_string())
        } else {
            dataset.column_names.first().cloned()
        };
        self.chart_kind = Some(ChartKind::CountByColumn);
        self.filter = None;
        self.status_message = None;
        self.dataset = Some(dataset);
        self.rebuild_chart();
    }

    /// Change the active chart and recompute.
    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart_kind = Some(kind);
        self.rebuild_chart();
    }

    /// Change the group-by column and recompute.
    pub fn set_group_column(&mut self, column: String) {
        self.group_column = Some(column);
        self.rebuild_chart();
    }

    /// Replace (or clear) the filter and recompute.
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter;
        self.rebuild_chart();
    }

    /// Recompute `chart` and `color_map` from the current selections.
    pub fn rebuild_chart(&mut self) {
        let chart = match (&self.dataset, self.chart_kind) {
            (Some(ds), Some(kind)) => {
                build_chart(ds, kind, self.group_column.as_deref(), self.filter.as_ref())
            }
            _ => ChartData::default(),
        };
        self.color_map = match chart.series.as_slice() {
            [only] => ColorMap::new(only.coords.iter().map(|p| p.x.as_str())),
            _ => ColorMap::default(),
        };
        self.chart = chart;
    }
}

// ---------------------------------------------------------------------------
// Chart assembly (pure, tested without any UI)
// ---------------------------------------------------------------------------

/// Build chart data for one selection: filter → group → map.
pub fn build_chart(
    dataset: &Dataset,
    kind: ChartKind,
    group_column: Option<&str>,
    filter: Option<&Filter>,
) -> ChartData {
    let rows: Vec<&Record> = filtered_indices(dataset, filter)
        .into_iter()
        .map(|i| &dataset.records[i])
        .collect();

    match kind {
        ChartKind::CountByColumn => {
            let column = group_column.unwrap_or("generation");
            let groups = group_by_field(rows, column);
            let coords = count_coordinates(&groups, column);
            ChartData {
                title: match filter {
                    Some(f) => format!("Count by {column} ({} = {})", f.field, f.value),
                    None => format!("Count by {column}"),
                },
                series: vec![ChartSeries {
                    name: column.to_string(),
                    coords,
                }],
            }
        }
        ChartKind::TypeDistribution => {
            let groups = group_by_field(rows, PRIMARY_TYPE);
            let mut coords = type_coordinates(&groups);
            sort_by_count(&mut coords);
            ChartData {
                title: "Primary type distribution".to_string(),
                series: vec![ChartSeries {
                    name: "Primary type".to_string(),
                    coords,
                }],
            }
        }
        ChartKind::StackedTypes => {
            let primary = type_coordinates(&group_by_field(rows.iter().copied(), PRIMARY_TYPE));
            let secondary = type_coordinates(&group_by_field(rows, SECONDARY_TYPE));
            let (primary, secondary) = align_series(primary, secondary);
            ChartData {
                title: "Primary vs secondary type".to_string(),
                series: vec![
                    ChartSeries {
                        name: "Primary".to_string(),
                        coords: primary,
                    },
                    ChartSeries {
                        name: "Secondary".to_string(),
                        coords: secondary,
                    },
                ],
            }
        }
    }
}

/// Give two series the same label axis so their bars can stack: every label
/// from either side appears in both, with a zero count where it was absent.
fn align_series(
    a: Vec<CoordinatePair>,
    b: Vec<CoordinatePair>,
) -> (Vec<CoordinatePair>, Vec<CoordinatePair>) {
    use std::collections::BTreeMap;

    let a_counts: BTreeMap<&str, u64> = a.iter().map(|p| (p.x.as_str(), p.y)).collect();
    let b_counts: BTreeMap<&str, u64> = b.iter().map(|p| (p.x.as_str(), p.y)).collect();

    let labels: Vec<String> = a_counts
        .keys()
        .chain(b_counts.keys())
        .map(|l| l.to_string())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let take = |counts: &BTreeMap<&str, u64>| {
        labels
            .iter()
            .map(|l| CoordinatePair {
                x: l.clone(),
                y: counts.get(l.as_str()).copied().unwrap_or(0),
            })
            .collect()
    };
    (take(&a_counts), take(&b_counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;

    fn rec(name: &str, t1: &str, t2: Option<&str>, gen: i64) -> Record {
        let mut r = Record::new();
        r.insert("name".into(), FieldValue::String(name.into()));
        r.insert("type1".into(), FieldValue::String(t1.into()));
        r.insert(
            "type2".into(),
            t2.map_or(FieldValue::Null, |t| FieldValue::String(t.into())),
        );
        r.insert("generation".into(), FieldValue::Integer(gen));
        r
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("gastly", "ghost", Some("poison"), 1),
            rec("haunter", "ghost", Some("poison"), 1),
            rec("misdreavus", "ghost", None, 2),
            rec("charmander", "fire", None, 1),
        ])
    }

    #[test]
    fn ghost_count_by_generation() {
        let ds = dataset();
        let filter = Filter::new("type1", FieldValue::String("ghost".into()));
        let chart = build_chart(
            &ds,
            ChartKind::CountByColumn,
            Some("generation"),
            Some(&filter),
        );

        assert_eq!(chart.series.len(), 1);
        assert_eq!(
            chart.series[0].coords,
            vec![
                CoordinatePair { x: "1".into(), y: 2 },
                CoordinatePair { x: "2".into(), y: 1 },
            ]
        );
    }

    #[test]
    fn type_distribution_is_sorted_ascending() {
        let ds = dataset();
        let chart = build_chart(&ds, ChartKind::TypeDistribution, None, None);
        let coords = &chart.series[0].coords;

        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0], CoordinatePair { x: "Fire".into(), y: 1 });
        assert_eq!(coords[1], CoordinatePair { x: "Ghost".into(), y: 3 });
    }

    #[test]
    fn stacked_series_share_one_label_axis() {
        let ds = dataset();
        let chart = build_chart(&ds, ChartKind::StackedTypes, None, None);

        assert_eq!(chart.series.len(), 2);
        let labels_a: Vec<&str> = chart.series[0].coords.iter().map(|p| p.x.as_str()).collect();
        let labels_b: Vec<&str> = chart.series[1].coords.iter().map(|p| p.x.as_str()).collect();
        assert_eq!(labels_a, labels_b);

        // Secondary "Poison" count is 2, primary "Poison" is 0.
        let poison_idx = labels_a.iter().position(|l| *l == "Poison").unwrap();
        assert_eq!(chart.series[0].coords[poison_idx].y, 0);
        assert_eq!(chart.series[1].coords[poison_idx].y, 2);
    }

    #[test]
    fn filter_with_no_matches_builds_an_empty_chart() {
        let ds = dataset();
        let filter = Filter::new("type1", FieldValue::String("dragon".into()));
        let chart = build_chart(
            &ds,
            ChartKind::CountByColumn,
            Some("generation"),
            Some(&filter),
        );
        assert!(chart.series[0].coords.is_empty());
    }

    #[test]
    fn empty_dataset_builds_an_empty_chart() {
        let ds = Dataset::default();
        let chart = build_chart(&ds, ChartKind::TypeDistribution, None, None);
        assert!(chart.series[0].coords.is_empty());
    }

    #[test]
    fn set_dataset_picks_generation_and_rebuilds() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.group_column.as_deref(), Some("generation"));
        assert_eq!(state.chart_kind, Some(ChartKind::CountByColumn));
        assert_eq!(state.chart.series[0].coords.len(), 2);
    }
}
