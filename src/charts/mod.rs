//! Charts module - figure model and rendering

pub mod figure;
mod plotter;
mod renderer;

pub use figure::{BarData, BarGroupSeries, Figure, FigureKind, GroupedBarData, LineData, PieData, PieSlice};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
