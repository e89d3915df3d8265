//! Static Chart Renderer
//! Renders the current report into a single 2x2 PNG with plotters.

use crate::charts::figure::{BarData, Figure, FigureKind, GroupedBarData, LineData, PieData};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to render report image: {0}")]
    Backend(String),
    #[error("no report on screen to export")]
    EmptyReport,
}

fn backend<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

/// Same hues as the interactive palette.
const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(96, 125, 139),
];

const ACCENT: RGBColor = RGBColor(52, 152, 219);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the report figures into a 2x2 grid PNG at `path`.
    pub fn render_report_png(
        figures: &[Figure],
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if figures.is_empty() {
            return Err(RenderError::EmptyReport);
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;

        let cells = root.split_evenly((2, 2));
        for (figure, cell) in figures.iter().zip(cells.iter()) {
            Self::render_figure(figure, cell)?;
        }

        root.present().map_err(backend)?;
        Ok(())
    }

    fn render_figure<DB: DrawingBackend>(
        figure: &Figure,
        cell: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let area = cell
            .titled(&figure.title, ("sans-serif", 18))
            .map_err(backend)?;

        match &figure.kind {
            FigureKind::Line(data) => Self::render_line(figure, data, &area),
            FigureKind::Bar(data) => Self::render_bar(figure, data, &area),
            FigureKind::GroupedBar(data) => Self::render_grouped_bar(figure, data, &area),
            FigureKind::Pie(data) => Self::render_pie(data, &area),
        }
    }

    fn render_line<DB: DrawingBackend>(
        figure: &Figure,
        data: &LineData,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        if data.points.is_empty() {
            return Ok(());
        }

        let (x_min, x_max) = Self::padded_range(data.points.iter().map(|p| p[0]));
        let (y_min, y_max) = Self::padded_range(data.points.iter().map(|p| p[1]));

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(34)
            .y_label_area_size(56)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(backend)?;

        if let Some(ticks) = &data.x_ticks {
            let n_labels = ticks.len();
            let fmt = Self::category_formatter(ticks.clone());
            chart
                .configure_mesh()
                .x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .x_labels(n_labels)
                .x_label_formatter(&fmt)
                .draw()
                .map_err(backend)?;
        } else {
            let fmt = |v: &f64| format!("{:.0}", v);
            chart
                .configure_mesh()
                .x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .x_label_formatter(&fmt)
                .draw()
                .map_err(backend)?;
        }

        chart
            .draw_series(LineSeries::new(
                data.points.iter().map(|p| (p[0], p[1])),
                ACCENT.stroke_width(2),
            ))
            .map_err(backend)?;
        chart
            .draw_series(
                data.points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 3, ACCENT.filled())),
            )
            .map_err(backend)?;

        Ok(())
    }

    fn render_bar<DB: DrawingBackend>(
        figure: &Figure,
        data: &BarData,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        if data.values.is_empty() {
            return Ok(());
        }

        let (_, y_max) = Self::padded_range(data.values.iter().copied());
        let n = data.categories.len();

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(34)
            .y_label_area_size(56)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)
            .map_err(backend)?;

        let fmt = Self::category_formatter(data.categories.clone());
        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .x_labels(n)
            .x_label_formatter(&fmt)
            .draw()
            .map_err(backend)?;

        chart
            .draw_series(data.values.iter().enumerate().map(|(i, &v)| {
                Rectangle::new(
                    [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, v)],
                    PALETTE[i % PALETTE.len()].filled(),
                )
            }))
            .map_err(backend)?;

        Ok(())
    }

    fn render_grouped_bar<DB: DrawingBackend>(
        figure: &Figure,
        data: &GroupedBarData,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let all_values: Vec<f64> = data
            .series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .collect();
        if all_values.is_empty() {
            return Ok(());
        }

        let (_, y_max) = Self::padded_range(all_values.iter().copied());
        let n = data.slots.len();
        let band = 0.8;
        let bar_width = band / data.series.len().max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(34)
            .y_label_area_size(56)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)
            .map_err(backend)?;

        let fmt = Self::category_formatter(data.slots.clone());
        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .x_labels(n)
            .x_label_formatter(&fmt)
            .draw()
            .map_err(backend)?;

        for (s_idx, series) in data.series.iter().enumerate() {
            let color = PALETTE[s_idx % PALETTE.len()];
            let offset = -band / 2.0 + bar_width * s_idx as f64;
            chart
                .draw_series(series.values.iter().enumerate().filter_map(|(slot, v)| {
                    v.map(|value| {
                        let x0 = slot as f64 + offset;
                        Rectangle::new([(x0, 0.0), (x0 + bar_width * 0.9, value)], color.filled())
                    })
                }))
                .map_err(backend)?
                .label(series.name.clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(backend)?;

        Ok(())
    }

    fn render_pie<DB: DrawingBackend>(
        data: &PieData,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let shares = data.shares();
        if shares.iter().sum::<f64>() <= 0.0 {
            return Ok(());
        }

        let dims = area.dim_in_pixel();
        let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
        let radius = (dims.0.min(dims.1) as f64 / 2.0 - 30.0).max(10.0);
        let sizes: Vec<f64> = shares.iter().map(|s| s * 100.0).collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();
        let labels: Vec<String> = data.slices.iter().map(|s| s.label.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 13).into_font().color(&BLACK));
        area.draw(&pie).map_err(backend)?;

        Ok(())
    }

    /// Axis formatter mapping integer x positions to category labels.
    fn category_formatter(labels: Vec<String>) -> impl Fn(&f64) -> String {
        move |v: &f64| {
            let idx = v.round() as usize;
            if (v - idx as f64).abs() < 0.25 && idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        }
    }

    /// Value range with headroom; degenerate ranges get a unit of slack.
    fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.1).max(1e-9);
        if (max - min).abs() < 1e-12 {
            (min - 1.0, max + 1.0)
        } else {
            (min - pad, max + pad)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_adds_headroom() {
        let (lo, hi) = StaticChartRenderer::padded_range([10.0, 20.0].into_iter());
        assert!(lo < 10.0 && hi > 20.0);
    }

    #[test]
    fn padded_range_handles_flat_and_empty_input() {
        let (lo, hi) = StaticChartRenderer::padded_range([5.0, 5.0].into_iter());
        assert!(lo < 5.0 && hi > 5.0);
        let (lo, hi) = StaticChartRenderer::padded_range(std::iter::empty());
        assert_eq!((lo, hi), (0.0, 1.0));
    }
}
