use crate::args::Filters;
use anyhow::Result;
use serde::Serialize;
use v4v5_dashboard::data::{MissingColumnWarning, Selection, SelectionOptions};

#[derive(Serialize)]
struct OptionsReport<'a> {
    rows: usize,
    warnings: &'a [MissingColumnWarning],
    selection: &'a Selection,
    options: SelectionOptions,
}

pub fn run(filters: &Filters) -> Result<()> {
    let (loaded, selection) = super::load_selection(filters)?;
    let report = OptionsReport {
        rows: loaded.dataset.len(),
        warnings: &loaded.warnings,
        selection: &selection,
        options: SelectionOptions::compute(&loaded.dataset, &selection),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
