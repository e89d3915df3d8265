//! Chart Plotter Module
//! Interactive rendering of report figures using egui_plot.

use crate::charts::figure::{BarData, Figure, FigureKind, GroupedBarData, LineData, PieData};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

/// Color for single-series charts
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Draws report figures with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th series or slice.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw one figure into the given vertical space.
    pub fn draw_figure(ui: &mut egui::Ui, id_salt: &str, figure: &Figure, height: f32) {
        match &figure.kind {
            FigureKind::Line(data) => Self::draw_line(ui, id_salt, figure, data, height),
            FigureKind::Bar(data) => Self::draw_bar(ui, id_salt, figure, data, height),
            FigureKind::GroupedBar(data) => {
                Self::draw_grouped_bar(ui, id_salt, figure, data, height)
            }
            FigureKind::Pie(data) => Self::draw_pie(ui, id_salt, data, height),
        }
    }

    fn draw_line(ui: &mut egui::Ui, id_salt: &str, figure: &Figure, data: &LineData, height: f32) {
        let mut plot = Plot::new(id_salt.to_string())
            .height(height)
            .allow_scroll(false)
            .x_axis_label(figure.x_label.clone())
            .y_axis_label(figure.y_label.clone());

        if let Some(ticks) = &data.x_ticks {
            let labels = ticks.clone();
            plot = plot.x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.25 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            });
        }

        let points = data.points.clone();
        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(ACCENT_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(2.5)
                    .color(ACCENT_COLOR),
            );
        });
    }

    fn draw_bar(ui: &mut egui::Ui, id_salt: &str, figure: &Figure, data: &BarData, height: f32) {
        let labels = data.categories.clone();
        let values = data.values.clone();

        Plot::new(id_salt.to_string())
            .height(height)
            .allow_scroll(false)
            .x_axis_label(figure.x_label.clone())
            .y_axis_label(figure.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.25 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        Bar::new(i as f64, v)
                            .width(0.6)
                            .fill(Self::series_color(i).gamma_multiply(0.85))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    fn draw_grouped_bar(
        ui: &mut egui::Ui,
        id_salt: &str,
        figure: &Figure,
        data: &GroupedBarData,
        height: f32,
    ) {
        let labels = data.slots.clone();
        let series = data.series.clone();
        let band = 0.8;
        let bar_width = band / series.len().max(1) as f64;

        Plot::new(id_salt.to_string())
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(figure.x_label.clone())
            .y_axis_label(figure.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.25 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (s_idx, s) in series.iter().enumerate() {
                    let color = Self::series_color(s_idx);
                    let offset = -band / 2.0 + bar_width * (s_idx as f64 + 0.5);
                    let bars: Vec<Bar> = s
                        .values
                        .iter()
                        .enumerate()
                        .filter_map(|(slot, v)| {
                            v.map(|value| {
                                Bar::new(slot as f64 + offset, value)
                                    .width(bar_width * 0.9)
                                    .fill(color.gamma_multiply(0.85))
                            })
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(&s.name));
                }
            });
    }

    fn draw_pie(ui: &mut egui::Ui, id_salt: &str, data: &PieData, height: f32) {
        let shares = data.shares();

        Plot::new(id_salt.to_string())
            .height(height)
            .data_aspect(1.0)
            .show_axes([false, false])
            .show_grid([false, false])
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .include_x(-1.3)
            .include_x(1.3)
            .include_y(-1.15)
            .include_y(1.15)
            .show(ui, |plot_ui| {
                // Start at 12 o'clock and sweep clockwise
                let mut start = std::f64::consts::FRAC_PI_2;
                for (i, (slice, &share)) in data.slices.iter().zip(&shares).enumerate() {
                    if share <= 0.0 {
                        continue;
                    }
                    let sweep = share * std::f64::consts::TAU;
                    let outline = Self::slice_outline(start, start - sweep);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .fill_color(Self::series_color(i).gamma_multiply(0.9))
                            .stroke(egui::Stroke::new(1.0, Color32::from_gray(30)))
                            .name(&slice.label),
                    );

                    let mid = start - sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.66 * mid.cos(), 0.66 * mid.sin()),
                        RichText::new(format!("{:.1}%", share * 100.0))
                            .size(12.0)
                            .color(Color32::WHITE),
                    ));
                    start -= sweep;
                }
            });
    }

    /// Arc fan for one pie slice, centered on the origin with radius 1.
    fn slice_outline(from: f64, to: f64) -> Vec<[f64; 2]> {
        let steps = ((from - to).abs() / 0.05).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for k in 0..=steps {
            let angle = from + (to - from) * k as f64 / steps as f64;
            points.push([angle.cos(), angle.sin()]);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_outline_is_closed_fan_around_origin() {
        let outline = ChartPlotter::slice_outline(std::f64::consts::FRAC_PI_2, 0.0);
        assert_eq!(outline[0], [0.0, 0.0]);
        // First arc point at 90°, last at 0°
        assert!((outline[1][0]).abs() < 1e-9 && (outline[1][1] - 1.0).abs() < 1e-9);
        let last = outline.last().unwrap();
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
        // All rim points on the unit circle
        for p in &outline[1..] {
            assert!(((p[0].powi(2) + p[1].powi(2)).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(ChartPlotter::series_color(0), ChartPlotter::series_color(10));
    }
}
