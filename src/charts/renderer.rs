//! Static Chart Renderer
//! Renders a [`ChartSpec`] to a PNG file with plotters.
//!
//! Layout mirrors the interactive chart: title on top, "Date" x axis,
//! "v4/v5 Values" y axis, one colored line per site and a legend box in the
//! upper right corner.

use crate::charts::plotter::ChartPlotter;
use crate::charts::spec::ChartSpec;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

const SECONDS_PER_DAY: f64 = 86_400.0;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to `path`; the image format follows the extension.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if width < 200 || height < 150 {
            return Err(RenderError::InvalidSize { width, height });
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let (x_min, x_max) = Self::x_range(spec);
        let (y_min, y_max) = Self::y_range(spec);

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_axis_title.as_str())
            .y_desc(spec.y_axis_title.as_str())
            .x_labels(6)
            .x_label_formatter(&|x: &f64| ChartPlotter::format_plot_x(*x))
            .y_label_formatter(&|y: &f64| format!("{:.2}", y))
            .draw()
            .map_err(draw_error)?;

        for (i, series) in spec.series.iter().enumerate() {
            let egui_color = ChartPlotter::series_color(i);
            let color = RGBColor(egui_color.r(), egui_color.g(), egui_color.b());

            let mut segments = ChartPlotter::segments(series);
            if segments.is_empty() {
                // an empty run keeps the site in the legend
                segments.push(Vec::new());
            }

            for (n, segment) in segments.into_iter().enumerate() {
                let drawn = chart
                    .draw_series(LineSeries::new(
                        segment.into_iter().map(|[x, y]| (x, y)),
                        color.stroke_width(2),
                    ))
                    .map_err(draw_error)?;

                if n == 0 {
                    drawn.label(series.name.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        if !spec.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        info!(path = %path.display(), series = spec.series.len(), "rendered chart image");
        Ok(())
    }

    /// X extent in plot seconds; one day either side of a single date, and a
    /// one-day window at the epoch when there is nothing to plot.
    pub fn x_range(spec: &ChartSpec) -> (f64, f64) {
        let xs = spec
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| ChartPlotter::to_plot_x(p.date));
        let (min, max) = min_max(xs).unwrap_or((0.0, SECONDS_PER_DAY));

        if min == max {
            (min - SECONDS_PER_DAY, max + SECONDS_PER_DAY)
        } else {
            (min, max)
        }
    }

    /// Y extent with 10% padding.
    pub fn y_range(spec: &ChartSpec) -> (f64, f64) {
        let ys = spec
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter_map(|p| p.value);
        let Some((min, max)) = min_max(ys) else {
            return (0.0, 1.0);
        };

        if min == max {
            return (min - 0.5, max + 0.5);
        }
        let pad = (max - min) * 0.1;
        (min - pad, max + pad)
    }
}

/// Extent of the finite values; infinities would leave the mesh unbounded.
fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn draw_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}
