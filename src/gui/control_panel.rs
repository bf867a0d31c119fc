//! Control Panel Widget
//! Left side panel with file upload, selection widgets and actions.

use egui::{Color32, ComboBox, RichText, ScrollArea};
use v4v5_dashboard::data::{MissingColumnWarning, Selection, SelectionOptions};

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub selection: Selection,
    pub options: SelectionOptions,
    pub file_names: Vec<String>,
    pub warnings: Vec<String>,
    pub status: String,
    pub has_chart: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            options: SelectionOptions::default(),
            file_names: Vec::new(),
            warnings: Vec::new(),
            status: "Ready".to_string(),
            has_chart: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset state for a freshly loaded upload set.
    pub fn set_loaded(&mut self, file_names: Vec<String>, warnings: &[MissingColumnWarning]) {
        self.file_names = file_names;
        self.warnings = warnings.iter().map(|w| w.to_string()).collect();
        self.selection = Selection::default();
        self.options = SelectionOptions::default();
        self.has_chart = false;
    }

    fn data_loaded(&self) -> bool {
        !self.file_names.is_empty()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 v4/v5 Ratio Analysis")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Upload Section =====
        ui.label(RichText::new("📁 CSV Files").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if self.file_names.is_empty() {
                    ui.label(RichText::new("No files selected").size(12.0).color(Color32::GRAY));
                } else {
                    for name in &self.file_names {
                        ui.label(RichText::new(name).size(12.0));
                    }
                }

                ui.add_space(4.0);
                if ui.button("📂 Choose CSV files").clicked() {
                    action = ControlPanelAction::ChooseFiles;
                }
            });

        for warning in &self.warnings {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("⚠ {}", warning))
                    .size(11.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.add_enabled_ui(self.data_loaded(), |ui| {
            let label_width = 110.0;
            let combo_width = 160.0;

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Country:"));
                let mut picked = None;
                ComboBox::from_id_salt("country")
                    .width(combo_width)
                    .selected_text(&self.selection.country)
                    .show_ui(ui, |ui| {
                        for country in &self.options.countries {
                            if ui
                                .selectable_label(self.selection.country == *country, country)
                                .clicked()
                            {
                                picked = Some(country.clone());
                            }
                        }
                    });
                if let Some(country) = picked {
                    self.selection.set_country(&country);
                    action = ControlPanelAction::SelectionChanged;
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Main Category:"));
                let mut picked = None;
                ComboBox::from_id_salt("main_category")
                    .width(combo_width)
                    .selected_text(&self.selection.main_category)
                    .show_ui(ui, |ui| {
                        for category in &self.options.main_categories {
                            if ui
                                .selectable_label(self.selection.main_category == *category, category)
                                .clicked()
                            {
                                picked = Some(category.clone());
                            }
                        }
                    });
                if let Some(category) = picked {
                    self.selection.set_main_category(&category);
                    action = ControlPanelAction::SelectionChanged;
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Sub Category:"));
                let mut picked = None;
                ComboBox::from_id_salt("sub_category")
                    .width(combo_width)
                    .selected_text(&self.selection.sub_category)
                    .show_ui(ui, |ui| {
                        for category in &self.options.sub_categories {
                            if ui
                                .selectable_label(self.selection.sub_category == *category, category)
                                .clicked()
                            {
                                picked = Some(category.clone());
                            }
                        }
                    });
                if let Some(category) = picked {
                    self.selection.set_sub_category(&category);
                    action = ControlPanelAction::SelectionChanged;
                }
            });

            ui.add_space(10.0);

            // ===== Sites =====
            ui.label("Sites:");
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                        if self.options.domains.is_empty() {
                            ui.label(RichText::new("No matching sites").color(Color32::GRAY));
                        }
                        for domain in &self.options.domains {
                            let mut checked = self.selection.is_domain_selected(domain);
                            if ui.checkbox(&mut checked, domain).changed() {
                                self.selection.set_domain(domain, checked);
                            }
                        }
                    });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    for domain in &self.options.domains {
                        self.selection.set_domain(domain, true);
                    }
                }
                if ui.small_button("Clear All").clicked() {
                    self.selection.domains.clear();
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.data_loaded(), |ui| {
                let button = egui::Button::new(RichText::new("▶ Plot Data").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Plot;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.has_chart, |ui| {
                let png_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ChooseFiles,
    SelectionChanged,
    Plot,
    ExportPng,
}
