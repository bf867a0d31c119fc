//! v4/v5 Dashboard - per-site v4/v5 ratio time series from uploaded CSV files
//!
//! The pipeline is UI-agnostic: [`DataLoader`] → [`CategoryNormalizer`] →
//! [`FilterEngine`] → [`ChartBuilder`]. The desktop app and the CLI both
//! drive it.

pub mod charts;
pub mod data;

pub use charts::{ChartBuilder, ChartSpec, LineSeries};
pub use data::{
    CategoryNormalizer, DataLoader, Dataset, FilterEngine, LoaderError, Record, Selection,
    SelectionOptions, UploadedFile,
};
