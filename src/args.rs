use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "v4v5-dashboard",
    about = "Upload v4/v5 ratio CSV files and chart them per site",
    version,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the desktop dashboard (default)
    Gui {
        /// CSV files to load on startup
        files: Vec<PathBuf>,
    },
    /// Print the selectable countries, categories and sites as JSON
    Options {
        #[command(flatten)]
        filters: Filters,
    },
    /// Build the chart for a selection and print it as JSON
    Plot {
        #[command(flatten)]
        filters: Filters,

        /// Site to plot; repeat for several
        #[arg(short, long = "site", value_name = "DOMAIN")]
        sites: Vec<String>,

        /// Write the chart JSON to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also render the chart as a PNG image
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// PNG width in pixels
        #[arg(long, default_value_t = 1400)]
        width: u32,

        /// PNG height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
}

/// Upload set plus the selection filters.
#[derive(ClapArgs, Debug)]
pub struct Filters {
    /// CSV files, concatenated in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Country to restrict to (defaults to the first one found)
    #[arg(short, long)]
    pub country: Option<String>,

    /// Main category; "Unknown" means all
    #[arg(short, long)]
    pub main_category: Option<String>,

    /// Sub category; "Unknown" means all
    #[arg(short = 'S', long)]
    pub sub_category: Option<String>,
}
