use crate::args::Filters;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use v4v5_dashboard::charts::StaticChartRenderer;

pub struct PlotOutput {
    pub out: Option<PathBuf>,
    pub png: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

pub fn run(filters: &Filters, sites: &[String], output: PlotOutput) -> Result<()> {
    let (loaded, mut selection) = super::load_selection(filters)?;
    for site in sites {
        selection.set_domain(site, true);
    }

    let chart = selection.chart(&loaded.dataset);
    info!(
        series = chart.series.len(),
        points = chart.point_count(),
        "built chart"
    );
    let json = serde_json::to_string_pretty(&chart)?;

    match &output.out {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Chart with {} series written to {}",
                chart.series.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    if let Some(path) = &output.png {
        StaticChartRenderer::render_png(&chart, path, output.width, output.height)?;
        eprintln!("Chart image written to {}", path.display());
    }

    Ok(())
}
