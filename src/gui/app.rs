//! Dashboard Main Application
//! Main window with control panel and chart viewer.
//!
//! Every action runs synchronously to completion before the next repaint.

use super::chart_viewer::PREVIEW_ROWS;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{info, warn};
use v4v5_dashboard::charts::StaticChartRenderer;
use v4v5_dashboard::data::{DataLoader, SelectionOptions, UploadedFile};

const PNG_WIDTH: u32 = 1400;
const PNG_HEIGHT: u32 = 800;

/// Main application window.
pub struct DashboardApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_files: Vec<PathBuf>) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        if !initial_files.is_empty() {
            app.open_paths(&initial_files);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_choose_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_files()
        {
            self.open_paths(&paths);
        }
    }

    fn open_paths(&mut self, paths: &[PathBuf]) {
        let files: Result<Vec<UploadedFile>, _> =
            paths.iter().map(|p| UploadedFile::from_path(p)).collect();

        match files {
            Ok(files) => self.load_files(&files),
            Err(e) => {
                warn!(error = %e, "failed to read upload");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Load an upload set. On failure the previous dataset stays in place.
    fn load_files(&mut self, files: &[UploadedFile]) {
        let loaded = match self.loader.load(files) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "load failed");
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        self.control_panel
            .set_loaded(loaded.file_names.clone(), &loaded.warnings);
        self.chart_viewer.clear();
        self.chart_viewer.set_preview(loaded.dataset.head(PREVIEW_ROWS));
        let status = format!(
            "Loaded {} rows from {} file(s)",
            loaded.dataset.len(),
            loaded.file_names.len()
        );

        self.control_panel.set_status(&status);
        self.refresh_options();
    }

    /// Recompute dependent choice lists after a selection change.
    fn refresh_options(&mut self) {
        let Some(loaded) = self.loader.current() else {
            return;
        };
        let dataset = &loaded.dataset;
        let panel = &mut self.control_panel;

        // Two passes: snapping the country changes which categories and sites exist
        for _ in 0..2 {
            panel.options = SelectionOptions::compute(dataset, &panel.selection);
            panel.selection.reconcile(&panel.options);
        }
    }

    fn handle_plot(&mut self) {
        let Some(loaded) = self.loader.current() else {
            self.control_panel.set_status("No data loaded");
            return;
        };

        let chart = self.control_panel.selection.chart(&loaded.dataset);
        info!(
            country = %self.control_panel.selection.country,
            series = chart.series.len(),
            points = chart.point_count(),
            "plotted selection"
        );
        self.control_panel.set_status(&format!(
            "Plotted {} site(s), {} point(s)",
            chart.series.len(),
            chart.point_count()
        ));
        self.control_panel.has_chart = true;
        self.chart_viewer.set_chart(chart);
    }

    fn handle_export_png(&mut self) {
        let Some(chart) = &self.chart_viewer.chart else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("v4v5_chart.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_png(chart, &output_path, PNG_WIDTH, PNG_HEIGHT) {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Chart exported to {}", output_path.display())),
            Err(e) => self.control_panel.set_status(&format!("Error: {}", e)),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::ChooseFiles => self.handle_choose_files(),
                        ControlPanelAction::SelectionChanged => self.refresh_options(),
                        ControlPanelAction::Plot => self.handle_plot(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
