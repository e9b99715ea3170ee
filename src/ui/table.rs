use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::DashboardSession;

/// Rows shown in the raw data preview.
pub const PREVIEW_ROWS: usize = 5;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Record table
// ---------------------------------------------------------------------------

/// Render the records at `indices` as a table: date, region, rate, then the
/// pass-through columns. `max_height` of `None` disables vertical scrolling.
pub fn record_table(
    ui: &mut Ui,
    id: &str,
    session: &DashboardSession,
    indices: &[usize],
    max_height: Option<f32>,
) {
    let table = &session.report.table;

    let mut headers: Vec<&str> = vec!["Date", "Region", "Rate (%)"];
    headers.extend(table.extra_columns.iter().map(String::as_str));

    ui.push_id(id, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(90.0), headers.len());
        builder = match max_height {
            Some(h) => builder.max_scroll_height(h),
            None => builder.vscroll(false),
        };

        builder
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in &headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                    let rec = &table.records[indices[row.index()]];
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.date.format("%Y-%m-%d").to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.region);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", rec.rate));
                    });
                    for value in &rec.extra {
                        row.col(|ui: &mut Ui| {
                            ui.label(value);
                        });
                    }
                });
            });
    });
}
