pub mod options;
pub mod plot;

use crate::args::Filters;
use anyhow::{Context, Result};
use v4v5_dashboard::data::{LoadedData, Selection, SelectionOptions, UploadedFile, UNKNOWN};

/// Load the upload set and resolve the selection the filters describe.
///
/// A missing country falls back to the first one in the data; a category
/// that does not occur is rejected rather than silently widened.
pub fn load_selection(filters: &Filters) -> Result<(LoadedData, Selection)> {
    let files = filters
        .files
        .iter()
        .map(|path| UploadedFile::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let loaded = LoadedData::from_files(&files).context("Failed to load CSV files")?;
    for warning in &loaded.warnings {
        eprintln!("  warning: {}", warning);
    }

    let mut selection = Selection::default();
    let countries = SelectionOptions::compute(&loaded.dataset, &selection).countries;
    let country = match &filters.country {
        Some(c) if !countries.contains(c) => anyhow::bail!("Country '{}' not found in data", c),
        Some(c) => c.clone(),
        None => countries.first().cloned().unwrap_or_default(),
    };
    selection.set_country(&country);

    if let Some(main) = &filters.main_category {
        selection.set_main_category(main);
        let options = SelectionOptions::compute(&loaded.dataset, &selection);
        if !options.main_categories.contains(main) {
            anyhow::bail!("Main category '{}' not found in data", main);
        }
    }
    if let Some(sub) = &filters.sub_category {
        selection.set_sub_category(sub);
        let options = SelectionOptions::compute(&loaded.dataset, &selection);
        if sub != UNKNOWN && !options.sub_categories.contains(sub) {
            anyhow::bail!(
                "Sub category '{}' not found for {} / {}",
                sub,
                selection.country,
                selection.main_category
            );
        }
    }

    Ok((loaded, selection))
}
