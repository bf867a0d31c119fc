//! v4/v5 Dashboard - per-site v4/v5 ratio charts from uploaded CSV files
//!
//! Desktop dashboard by default; `options` and `plot` run the same pipeline
//! headless and print JSON.

mod args;
mod commands;
mod gui;

use anyhow::Result;
use args::{Args, Command};
use clap::Parser;
use commands::plot::PlotOutput;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_gui(files: Vec<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("v4/v5 Ratio Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "v4/v5 Ratio Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, files)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    match args.command {
        None => run_gui(Vec::new()),
        Some(Command::Gui { files }) => run_gui(files),
        Some(Command::Options { filters }) => commands::options::run(&filters),
        Some(Command::Plot {
            filters,
            sites,
            out,
            png,
            width,
            height,
        }) => commands::plot::run(
            &filters,
            &sites,
            PlotOutput {
                out,
                png,
                width,
                height,
            },
        ),
    }
}
