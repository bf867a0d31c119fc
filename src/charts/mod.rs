//! Charts module - chart specification, interactive plotting and PNG export

mod plotter;
mod renderer;
mod spec;

pub use plotter::{ChartPlotter, PALETTE};
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{
    ChartBuilder, ChartPoint, ChartSpec, LineSeries, LEGEND_TITLE, X_AXIS_TITLE, Y_AXIS_TITLE,
};
