use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::generate_palette;
use crate::state::{AppState, ChartSeries};

// ---------------------------------------------------------------------------
// Bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the active chart in the central panel.
///
/// Bars sit at integer x positions; the axis formatter maps positions back
/// to category labels. An empty coordinate list still renders, just with no
/// bars.
pub fn bar_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view charts  (File → Open…)");
        });
        return;
    }

    let chart = &state.chart;
    ui.heading(&chart.title);

    let labels: Vec<String> = chart
        .series
        .first()
        .map(|s| s.coords.iter().map(|p| p.x.clone()).collect())
        .unwrap_or_default();

    Plot::new("bar_plot")
        .legend(egui_plot::Legend::default())
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value;
            if pos < 0.0 || (pos - pos.round()).abs() > f64::EPSILON {
                return String::new();
            }
            labels.get(pos.round() as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            match chart.series.as_slice() {
                // Plain bar chart: one colour per category.
                [single] => {
                    let bars: Vec<Bar> = single
                        .coords
                        .iter()
                        .enumerate()
                        .map(|(i, pair)| {
                            Bar::new(i as f64, pair.y as f64)
                                .name(&pair.x)
                                .fill(state.color_map.color_for(&pair.x))
                                .width(0.7)
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&single.name));
                }
                // Stacked chart: one colour per series, second stacked on
                // the first. Series share one label axis by construction.
                [bottom, top] => {
                    let palette = generate_palette(2);
                    let bottom_chart = series_bars(bottom, palette[0]);
                    let top_chart = series_bars(top, palette[1]).stack_on(&[&bottom_chart]);
                    plot_ui.bar_chart(bottom_chart);
                    plot_ui.bar_chart(top_chart);
                }
                _ => {}
            }
        });
}

fn series_bars(series: &ChartSeries, color: Color32) -> BarChart {
    let bars: Vec<Bar> = series
        .coords
        .iter()
        .enumerate()
        .map(|(i, pair)| Bar::new(i as f64, pair.y as f64).name(&pair.x).width(0.7))
        .collect();
    BarChart::new(bars).name(&series.name).color(color)
}
