use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::RegionFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – region filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let regions = match &state.session {
        Some(session) => session.report.table.regions.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Select Region");
    let mut selected = state.filter.clone();
    egui::ComboBox::from_id_salt("region_filter")
        .selected_text(selected.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, RegionFilter::All, "All");
            for region in &regions {
                ui.selectable_value(&mut selected, RegionFilter::Only(region.clone()), region);
            }
        });
    state.set_filter(selected);

    ui.add_space(8.0);
    ui.label(format!("{} regions", regions.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} records loaded, {} visible",
                session.report.table.len(),
                state.visible_indices.len()
            ));

            let dropped = &session.report.dropped;
            if !dropped.is_empty() {
                ui.separator();
                let details = dropped
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                ui.label(
                    RichText::new(format!(
                        "{} of {} rows dropped",
                        dropped.len(),
                        session.report.rows_read()
                    ))
                    .color(Color32::YELLOW),
                )
                .on_hover_text(details);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Render the mean / max / min metric row for the visible records.
pub fn metrics(ui: &mut Ui, state: &AppState) {
    let Some(summary) = state.summary() else {
        ui.label(
            RichText::new("No data available for the selected region.").color(Color32::YELLOW),
        );
        return;
    };

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Mean Unemployment Rate", &summary.mean_label());
        metric(&mut cols[1], "Max Unemployment Rate", &summary.max_label());
        metric(&mut cols[2], "Min Unemployment Rate", &summary.min_label());
    });
    ui.small(format!("over {} observations", summary.count));
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}
