//! CSV Data Loader Module
//! Parses uploaded CSV files with Polars and memoizes the combined dataset.

use crate::data::normalizer::{CategoryNormalizer, MissingColumnWarning};
use crate::data::record::{
    CategoryColumn, Dataset, Record, COUNTRY_COL, DATE_COL, DOMAIN_COL, RATIO_COL,
    REQUIRED_COLUMNS,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Every variant aborts the load; the previously cached dataset is untouched.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No files uploaded")]
    NoFiles,
    #[error("Failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: PolarsError,
    },
    #[error("{file}: required column '{column}' is missing")]
    MissingColumn { file: String, column: &'static str },
    #[error("{file}: row {row} has no value for '{column}'")]
    MissingValue {
        file: String,
        row: usize,
        column: &'static str,
    },
    #[error("{file}: row {row} has an unparsable date '{value}'")]
    InvalidDate {
        file: String,
        row: usize,
        value: String,
    },
    #[error("No data loaded")]
    NoData,
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a `date` cell into a timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// One uploaded file: display name plus raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after its file name.
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            file: name.clone(),
            source,
        })?;
        Ok(Self { name, bytes })
    }
}

/// Fingerprint of an upload set: names, sizes and content hashes, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSetKey(String);

impl FileSetKey {
    pub fn of(files: &[UploadedFile]) -> Self {
        let mut hasher = Sha256::new();
        for file in files {
            hasher.update(file.name.as_bytes());
            hasher.update([0u8]);
            hasher.update((file.bytes.len() as u64).to_le_bytes());
            hasher.update(Sha256::digest(&file.bytes));
        }
        Self(format!("{:x}", hasher.finalize()))
    }
}

impl fmt::Display for FileSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form is enough for logs
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}

/// Normalized dataset plus whatever the normalizer had to report.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub warnings: Vec<MissingColumnWarning>,
    pub file_names: Vec<String>,
}

impl LoadedData {
    /// Parse, concatenate and normalize an upload set (no caching).
    pub fn from_files(files: &[UploadedFile]) -> Result<Self, LoaderError> {
        let mut dataset = DataLoader::concat_files(files)?;
        let warnings = CategoryNormalizer::normalize(&mut dataset);
        Ok(Self {
            dataset,
            warnings,
            file_names: files.iter().map(|f| f.name.clone()).collect(),
        })
    }
}

struct CachedLoad {
    key: FileSetKey,
    data: LoadedData,
}

/// Loads upload sets, keeping the last successful one keyed by its fingerprint.
pub struct DataLoader {
    cache: Option<CachedLoad>,
    parses: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: None,
            parses: 0,
        }
    }

    /// Load an upload set, reusing the cached result when the fingerprint matches.
    ///
    /// A different fingerprint replaces the cache entry only once the new set
    /// has parsed successfully.
    pub fn load(&mut self, files: &[UploadedFile]) -> Result<&LoadedData, LoaderError> {
        if files.is_empty() {
            return Err(LoaderError::NoFiles);
        }

        let key = FileSetKey::of(files);
        let hit = self.cache.as_ref().is_some_and(|cached| cached.key == key);

        if hit {
            debug!(key = %key, "file set unchanged, reusing cached dataset");
        } else {
            self.parses += 1;
            let data = LoadedData::from_files(files)?;
            info!(
                key = %key,
                files = files.len(),
                rows = data.dataset.len(),
                "loaded dataset"
            );
            self.cache = Some(CachedLoad { key, data });
        }

        self.current().ok_or(LoaderError::NoData)
    }

    /// The last successfully loaded upload set.
    pub fn current(&self) -> Option<&LoadedData> {
        self.cache.as_ref().map(|cached| &cached.data)
    }

    /// Number of upload sets actually parsed; cache hits do not count.
    pub fn parse_count(&self) -> usize {
        self.parses
    }

    pub fn current_key(&self) -> Option<&FileSetKey> {
        self.cache.as_ref().map(|cached| &cached.key)
    }

    pub fn clear(&mut self) {
        self.cache = None;
    }

    /// Parse every file and concatenate in upload order.
    pub fn concat_files(files: &[UploadedFile]) -> Result<Dataset, LoaderError> {
        if files.is_empty() {
            return Err(LoaderError::NoFiles);
        }

        let mut combined = Dataset::default();
        for file in files {
            let parsed = Self::parse_file(file)?;
            debug!(file = %file.name, rows = parsed.len(), "parsed file");
            combined.append(parsed);
        }
        Ok(combined)
    }

    /// Parse a single CSV upload into typed records.
    pub fn parse_file(file: &UploadedFile) -> Result<Dataset, LoaderError> {
        let csv_err = |source: PolarsError| LoaderError::Csv {
            file: file.name.clone(),
            source,
        };

        // Schema inference off: every column arrives as text and is typed below
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(file.bytes.as_slice()))
            .finish()
            .map_err(csv_err)?;

        for column in REQUIRED_COLUMNS {
            if df.get_column_index(column).is_none() {
                return Err(LoaderError::MissingColumn {
                    file: file.name.clone(),
                    column,
                });
            }
        }

        let dates = Self::text_column(&df, DATE_COL).map_err(csv_err)?;
        let countries = Self::text_column(&df, COUNTRY_COL).map_err(csv_err)?;
        let domains = Self::text_column(&df, DOMAIN_COL).map_err(csv_err)?;
        let ratios = Self::text_column(&df, RATIO_COL).map_err(csv_err)?;

        let main_categories =
            Self::optional_text_column(&df, CategoryColumn::MainCategory).map_err(csv_err)?;
        let sub_categories =
            Self::optional_text_column(&df, CategoryColumn::SubCategory).map_err(csv_err)?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            // 1-based data row, header excluded
            let row = i + 1;
            let missing = |column| LoaderError::MissingValue {
                file: file.name.clone(),
                row,
                column,
            };

            let raw_date = dates.get(i).ok_or_else(|| missing(DATE_COL))?;
            let date = parse_date(raw_date).ok_or_else(|| LoaderError::InvalidDate {
                file: file.name.clone(),
                row,
                value: raw_date.to_string(),
            })?;
            let country =
                Self::text_cell(Some(countries), i).ok_or_else(|| missing(COUNTRY_COL))?;
            let domain =
                Self::text_cell(Some(domains), i).ok_or_else(|| missing(DOMAIN_COL))?;

            records.push(Record {
                date,
                country,
                domain,
                main_category: Self::text_cell(main_categories, i),
                sub_category: Self::text_cell(sub_categories, i),
                v4_v5_ratio: Self::ratio_cell(ratios, i),
            });
        }

        Ok(Dataset::new(
            records,
            main_categories.is_some(),
            sub_categories.is_some(),
        ))
    }

    fn text_column<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<&'a StringChunked> {
        df.column(name)?.as_materialized_series().str()
    }

    fn optional_text_column(
        df: &DataFrame,
        column: CategoryColumn,
    ) -> PolarsResult<Option<&StringChunked>> {
        if df.get_column_index(column.name()).is_none() {
            return Ok(None);
        }
        Self::text_column(df, column.name()).map(Some)
    }

    /// Trimmed cell text; blank cells count as missing, like an empty CSV field.
    fn text_cell(column: Option<&StringChunked>, i: usize) -> Option<String> {
        column
            .and_then(|c| c.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Numeric ratio, or `None` for blank, non-numeric, NaN and infinite cells.
    fn ratio_cell(column: &StringChunked, i: usize) -> Option<f64> {
        column
            .get(i)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}
