//! Control Panel Widget
//! Left side panel with the report selectors and data source controls.

use crate::report::{ReportKind, Selection, FIRST_YEAR, LAST_YEAR};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel with the two dropdowns and action buttons.
pub struct ControlPanel {
    pub selection: Selection,
    /// Local dataset override, when the user browsed for one.
    pub csv_path: Option<PathBuf>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            // The original dashboard starts on Yearly Statistics
            selection: Selection {
                report: Some(ReportKind::Yearly),
                year: None,
            },
            csv_path: None,
            progress: 0.0,
            status: "Loading dataset...".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 Automobile Sales")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Statistics Dashboard")
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Report Selection =====
        ui.label(RichText::new("Select Statistics:").size(14.0).strong());
        ui.add_space(5.0);

        let report_text = self
            .selection
            .report
            .map(|kind| kind.label())
            .unwrap_or("Select a report type");
        ComboBox::from_id_salt("dropdown_statistics")
            .width(220.0)
            .selected_text(report_text)
            .show_ui(ui, |ui| {
                for kind in ReportKind::ALL {
                    if ui
                        .selectable_label(self.selection.report == Some(kind), kind.label())
                        .clicked()
                        && self.selection.report != Some(kind)
                    {
                        self.selection.report = Some(kind);
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(8.0);

        // Year dropdown, live only for yearly statistics
        let year_text = self
            .selection
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Select a year".to_string());
        ui.add_enabled_ui(self.selection.year_selector_enabled(), |ui| {
            ComboBox::from_id_salt("select_year")
                .width(220.0)
                .selected_text(year_text)
                .show_ui(ui, |ui| {
                    for year in FIRST_YEAR..=LAST_YEAR {
                        if ui
                            .selectable_label(self.selection.year == Some(year), year.to_string())
                            .clicked()
                            && self.selection.year != Some(year)
                        {
                            self.selection.year = Some(year);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let source_text = self
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "remote dataset".to_string());
                ui.label(RichText::new(source_text).size(12.0));

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    if ui.button("⟳ Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(160.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress =====
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("ready") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    BrowseCsv,
    Reload,
    ExportPng,
}
