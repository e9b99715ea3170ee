use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::DatasetSource;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Build the dashboard and load the dataset once.
    pub fn new(source: DatasetSource) -> Self {
        let mut state = AppState::new(source);
        state.reload();
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("Unemployment Rate Analysis");
    ui.separator();

    let Some(session) = &state.session else {
        let msg = state
            .status_message
            .as_deref()
            .unwrap_or("No dataset loaded.");
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(msg).color(Color32::RED).heading());
        });
        return;
    };

    if session.report.table.is_empty() {
        ui.label(
            RichText::new("The dataset contains no rows with a valid date and rate.")
                .color(Color32::YELLOW),
        );
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Raw Data Preview");
            let preview: Vec<usize> = state
                .visible_indices
                .iter()
                .copied()
                .take(table::PREVIEW_ROWS)
                .collect();
            table::record_table(ui, "preview_table", session, &preview, None);
            ui.separator();

            ui.strong("Unemployment Statistics");
            panels::metrics(ui, state);
            ui.separator();

            if !state.visible_indices.is_empty() {
                plot::trend_plot(ui, state);
                ui.separator();
                plot::distribution_plot(ui, state);
                ui.separator();
            }

            ui.strong("Filtered Data");
            table::record_table(ui, "filtered_table", session, &state.visible_indices, Some(400.0));
        });
}
