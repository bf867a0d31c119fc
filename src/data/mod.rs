//! Data module - CSV loading, normalization, filtering and selection state

mod filter;
mod loader;
mod normalizer;
pub(crate) mod record;
mod selection;

pub use filter::FilterEngine;
pub use loader::{parse_date, DataLoader, FileSetKey, LoadedData, LoaderError, UploadedFile};
pub use normalizer::{CategoryNormalizer, MissingColumnWarning};
pub use record::{
    CategoryColumn, Dataset, Record, COUNTRY_COL, DATE_COL, DOMAIN_COL, MAIN_CATEGORY_COL,
    RATIO_COL, REQUIRED_COLUMNS, SUB_CATEGORY_COL, UNKNOWN,
};
pub use selection::{Selection, SelectionOptions};
