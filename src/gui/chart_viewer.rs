//! Chart Viewer Widget
//! Central panel laying the report figures out two rows by two columns.

use crate::charts::{ChartPlotter, Figure};
use egui::{RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const MIN_CARD_HEIGHT: f32 = 280.0;

/// Central chart grid. Holds whatever the report builder last produced.
pub struct ChartViewer {
    figures: Vec<Figure>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            figures: Vec::new(),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_figures(&mut self, figures: Vec<Figure>) {
        self.figures = figures;
    }

    pub fn clear(&mut self) {
        self.figures.clear();
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Draw the 2x2 chart grid, or a hint while there is nothing to show.
    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figures.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Pick a report type — and a year for yearly statistics")
                        .size(16.0),
                );
            });
            return;
        }

        let avail = ui.available_size();
        let card_width = ((avail.x - CHART_SPACING * 3.0) / 2.0).max(320.0);
        let card_height = ((avail.y - CHART_SPACING * 3.0) / 2.0).max(MIN_CARD_HEIGHT);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (row_idx, row) in self.figures.chunks(2).enumerate() {
                    ui.horizontal(|ui| {
                        for (col_idx, figure) in row.iter().enumerate() {
                            let panel_idx = row_idx * 2 + col_idx;
                            Self::draw_card(ui, figure, panel_idx, card_width, card_height);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, figure: &Figure, panel_idx: usize, width: f32, height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width - 24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&figure.title).size(14.0).strong());
                    ui.add_space(6.0);
                    ChartPlotter::draw_figure(
                        ui,
                        &format!("report_panel_{panel_idx}"),
                        figure,
                        height - 60.0,
                    );
                });
            });
    }
}
