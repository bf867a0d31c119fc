//! Chart Viewer Widget
//! Central panel: sample rows of the loaded data above the v4/v5 chart.

use egui::{RichText, ScrollArea};
use v4v5_dashboard::charts::{ChartPlotter, ChartSpec};
use v4v5_dashboard::data::Record;

pub const PREVIEW_ROWS: usize = 5;
const CHART_HEIGHT: f32 = 480.0;

/// Preview table plus the most recently plotted chart.
#[derive(Default)]
pub struct ChartViewer {
    pub preview: Vec<Record>,
    pub chart: Option<ChartSpec>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.preview.clear();
        self.chart = None;
    }

    pub fn set_preview(&mut self, records: &[Record]) {
        self.preview = records.to_vec();
    }

    pub fn set_chart(&mut self, chart: ChartSpec) {
        self.chart = Some(chart);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.preview.is_empty() && self.chart.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Choose CSV files to begin").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.preview.is_empty() {
                    ui.label(RichText::new("Sample data").size(16.0).strong());
                    ui.add_space(5.0);
                    Self::draw_preview_table(ui, &self.preview);
                    ui.add_space(15.0);
                }

                if let Some(chart) = &self.chart {
                    Self::draw_chart_card(ui, chart);
                }
            });
    }

    fn draw_preview_table(ui: &mut egui::Ui, records: &[Record]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("preview_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "date",
                            "country",
                            "domain",
                            "v4_v5_ratio",
                            "main_category",
                            "sub_category",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for r in records {
                            ui.label(RichText::new(r.date.format("%Y-%m-%d %H:%M").to_string()).size(11.0));
                            ui.label(RichText::new(&r.country).size(11.0));
                            ui.label(RichText::new(&r.domain).size(11.0));
                            let ratio = r
                                .v4_v5_ratio
                                .map(|v| format!("{:.3}", v))
                                .unwrap_or_else(|| "-".to_string());
                            ui.label(RichText::new(ratio).size(11.0));
                            ui.label(RichText::new(r.main_category()).size(11.0));
                            ui.label(RichText::new(r.sub_category()).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartSpec) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&chart.title).size(18.0).strong());
                ui.add_space(8.0);
                ChartPlotter::draw_legend(ui, chart);
                ui.add_space(8.0);
                ChartPlotter::draw_line_chart(ui, chart, CHART_HEIGHT);

                if chart.is_empty() {
                    ui.label(RichText::new("No data for the current selection").color(egui::Color32::GRAY));
                }
            });
    }
}
