use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Filter;
use crate::data::model::FieldValue;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – chart selection widgets
// ---------------------------------------------------------------------------

/// Render the left chart-configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the widgets.
    let columns = dataset.column_names.clone();
    let unique = dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Chart kind selector ----
            ui.strong("Kind");
            let current_kind = state.chart_kind.unwrap_or(ChartKind::CountByColumn);
            egui::ComboBox::from_id_salt("chart_kind")
                .selected_text(current_kind.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in ChartKind::ALL {
                        if ui
                            .selectable_label(current_kind == kind, kind.label())
                            .clicked()
                        {
                            state.set_chart_kind(kind);
                        }
                    }
                });
            ui.separator();

            // ---- Group-by column (count chart only) ----
            if current_kind == ChartKind::CountByColumn {
                ui.strong("Group by");
                let current_col = state.group_column.clone().unwrap_or_default();
                egui::ComboBox::from_id_salt("group_by")
                    .selected_text(&current_col)
                    .show_ui(ui, |ui: &mut Ui| {
                        for col in &columns {
                            if ui
                                .selectable_label(current_col == *col, col)
                                .clicked()
                            {
                                state.set_group_column(col.clone());
                            }
                        }
                    });
                ui.separator();
            }

            // ---- Optional exact-match filter ----
            ui.strong("Filter");
            let current_filter = state.filter.clone();
            let filter_col = current_filter
                .as_ref()
                .map(|f| f.field.clone())
                .unwrap_or_default();

            egui::ComboBox::from_id_salt("filter_column")
                .selected_text(if filter_col.is_empty() {
                    "(none)"
                } else {
                    filter_col.as_str()
                })
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(filter_col.is_empty(), "(none)").clicked() {
                        state.set_filter(None);
                    }
                    for col in &columns {
                        if ui.selectable_label(filter_col == *col, col).clicked() {
                            // Default to the column's first unique value.
                            let value = unique
                                .get(col)
                                .and_then(|vals| vals.iter().next().cloned())
                                .unwrap_or(FieldValue::Null);
                            state.set_filter(Some(Filter::new(col.clone(), value)));
                        }
                    }
                });

            if let Some(filter) = &current_filter {
                if let Some(values) = unique.get(&filter.field) {
                    egui::ComboBox::from_id_salt("filter_value")
                        .selected_text(filter.value.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            for val in values {
                                if ui
                                    .selectable_label(filter.value == *val, val.to_string())
                                    .clicked()
                                {
                                    state.set_filter(Some(Filter::new(
                                        filter.field.clone(),
                                        val.clone(),
                                    )));
                                }
                            }
                        });
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart data…").clicked() {
                export_chart_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown: u64 = state
                .chart
                .series
                .first()
                .map(|s| s.coords.iter().map(|p| p.y).sum())
                .unwrap_or(0);
            ui.label(format!("{} records loaded, {shown} charted", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write the current chart's coordinate pairs as JSON.
pub fn export_chart_dialog(state: &mut AppState) {
    if state.chart.series.is_empty() {
        state.status_message = Some("Nothing to export yet.".to_string());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();

    if let Some(path) = file {
        let result = serde_json::to_string_pretty(&state.chart.series_coords())
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));

        match result {
            Ok(()) => {
                log::info!("Exported chart data to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export chart data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
