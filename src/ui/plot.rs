use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::data::stats::{self, HISTOGRAM_BINS, KDE_POINTS};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

/// Dates are plotted as days since the common era.
fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn format_date_axis(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Trend plot
// ---------------------------------------------------------------------------

/// Render the unemployment rate over time, one point per date.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };

    let trend = stats::trend(session.records(&state.visible_indices));
    let points: Vec<[f64; 2]> = trend.iter().map(|p| [date_to_x(p.date), p.rate]).collect();

    ui.strong("Unemployment Rate Over Time");
    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Unemployment Rate (%)")
        .x_axis_formatter(|mark, _range| format_date_axis(mark.value))
        .label_formatter(|_name, value| {
            format!("{}\n{:.2}%", format_date_axis(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Rate")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(3.0)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// ---------------------------------------------------------------------------
// Distribution plot
// ---------------------------------------------------------------------------

/// Render the histogram of rates with a smoothed density overlay.
pub fn distribution_plot(ui: &mut Ui, state: &AppState) {
    let rates = state.visible_rates();
    let Some(hist) = stats::histogram(&rates, HISTOGRAM_BINS) else {
        return;
    };

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bar::new(hist.bin_center(i), count as f64).width(hist.bin_width))
        .collect();

    // Density is scaled to the count axis of the histogram.
    let scale = hist.total() as f64 * hist.bin_width;
    let density = stats::kde(&rates, KDE_POINTS).map(|curve| {
        curve
            .into_iter()
            .map(|[x, y]| [x, y * scale])
            .collect::<Vec<[f64; 2]>>()
    });

    ui.strong("Distribution of Unemployment Rate");
    Plot::new("distribution_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Unemployment Rate (%)")
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Count")
                    .color(Color32::from_rgb(60, 160, 90)),
            );
            if let Some(curve) = density {
                plot_ui.line(
                    Line::new(PlotPoints::from(curve))
                        .name("Density")
                        .color(Color32::DARK_GREEN)
                        .width(2.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips() {
        let d = NaiveDate::from_ymd_opt(2020, 11, 30).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(format_date_axis(date_to_x(d) + 0.3), "2020-11-30");
    }
}
