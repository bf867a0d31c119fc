//! Category Normalizer Module
//! Guarantees both classification columns exist and carry no missing values.

use crate::data::record::{CategoryColumn, Dataset, UNKNOWN};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Non-fatal: a classification column was absent from every uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingColumnWarning {
    pub column: CategoryColumn,
}

impl fmt::Display for MissingColumnWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The '{}' column is missing in the uploaded files.",
            self.column
        )
    }
}

/// Fills classification gaps with the "Unknown" sentinel.
pub struct CategoryNormalizer;

impl CategoryNormalizer {
    /// Normalize in place.
    ///
    /// A column absent from every source is synthesized and reported as a
    /// warning; null cells of a present column are filled silently.
    /// Running this twice leaves the dataset unchanged and yields no warnings.
    pub fn normalize(dataset: &mut Dataset) -> Vec<MissingColumnWarning> {
        let mut warnings = Vec::new();

        for column in CategoryColumn::ALL {
            if !dataset.has_column(column) {
                warn!(
                    column = column.name(),
                    "category column missing, defaulting to {}",
                    UNKNOWN
                );
                warnings.push(MissingColumnWarning { column });
                dataset.mark_column_present(column);
            }

            for record in dataset.records_mut() {
                let value = record.category_mut(column);
                if value.is_none() {
                    *value = Some(UNKNOWN.to_string());
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::tests::record;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                record(1, "US", "a.com", Some("News"), None, 1.2),
                record(2, "US", "a.com", None, Some("Daily"), 1.5),
            ],
            true,
            false,
        )
    }

    #[test]
    fn fills_nulls_and_synthesizes_absent_column() {
        let mut ds = sample();
        let warnings = CategoryNormalizer::normalize(&mut ds);

        assert_eq!(
            warnings,
            vec![MissingColumnWarning {
                column: CategoryColumn::SubCategory
            }]
        );
        assert!(ds.has_column(CategoryColumn::SubCategory));
        for r in ds.records() {
            assert!(r.main_category.is_some());
            assert!(r.sub_category.is_some());
        }
        assert_eq!(ds.records()[1].main_category.as_deref(), Some(UNKNOWN));
        // present values survive
        assert_eq!(ds.records()[1].sub_category.as_deref(), Some("Daily"));
    }

    #[test]
    fn is_idempotent() {
        let mut once = sample();
        CategoryNormalizer::normalize(&mut once);
        let mut twice = once.clone();
        let warnings = CategoryNormalizer::normalize(&mut twice);

        assert_eq!(once, twice);
        assert!(warnings.is_empty());
    }

    #[test]
    fn warning_text_names_the_column() {
        let w = MissingColumnWarning {
            column: CategoryColumn::MainCategory,
        };
        assert_eq!(
            w.to_string(),
            "The 'main_category' column is missing in the uploaded files."
        );
    }
}
