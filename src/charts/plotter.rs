//! Chart Plotter Module
//! Draws a [`ChartSpec`] as an interactive line chart using egui_plot.

use crate::charts::spec::{ChartSpec, LineSeries};
use chrono::{DateTime, NaiveDateTime};
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};

/// Color palette for sites
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Draws line charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th series.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Plot x coordinate: seconds since the Unix epoch.
    pub fn to_plot_x(date: NaiveDateTime) -> f64 {
        date.and_utc().timestamp() as f64
    }

    /// Axis label for a plot x coordinate.
    pub fn format_plot_x(x: f64) -> String {
        DateTime::from_timestamp(x.round() as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Split a series into drawable runs, breaking at missing or non-finite values.
    pub fn segments(series: &LineSeries) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for point in &series.points {
            match point.value {
                Some(y) if y.is_finite() => current.push([Self::to_plot_x(point.date), y]),
                _ if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Legend row: title followed by a color square and name per site.
    pub fn draw_legend(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(format!("{}:", spec.legend_title)).size(13.0).strong());
            ui.add_space(6.0);

            for (i, series) in spec.series.iter().enumerate() {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 3.0, Self::series_color(i));

                let text = RichText::new(&series.name).size(13.0);
                // keep empty series listed, but mark them
                let text = if series.points.is_empty() {
                    text.color(Color32::GRAY).italics()
                } else {
                    text
                };
                ui.label(text);
                ui.add_space(10.0);
            }
        });
    }

    /// Draw the line chart. An empty spec still renders the axes.
    pub fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        Plot::new("v4v5_line_chart")
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_axis_title.clone())
            .y_axis_label(spec.y_axis_title.clone())
            .x_axis_formatter(|mark, _range| Self::format_plot_x(mark.value))
            .label_formatter(|name, value| {
                let date = Self::format_plot_x(value.x);
                if name.is_empty() {
                    format!("{}\n{:.3}", date, value.y)
                } else {
                    format!("{}\n{}\n{:.3}", name, date, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (i, series) in spec.series.iter().enumerate() {
                    let color = Self::series_color(i);

                    for segment in Self::segments(series) {
                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(segment))
                                .color(color)
                                .width(2.0)
                                .name(&series.name),
                        );
                    }
                }
            });
    }
}
