//! Record and Dataset types
//! Typed rows of the combined upload set.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Sentinel for an absent classification. As a selection it means "all".
pub const UNKNOWN: &str = "Unknown";

pub const DATE_COL: &str = "date";
pub const COUNTRY_COL: &str = "country";
pub const DOMAIN_COL: &str = "domain";
pub const RATIO_COL: &str = "v4_v5_ratio";
pub const MAIN_CATEGORY_COL: &str = "main_category";
pub const SUB_CATEGORY_COL: &str = "sub_category";

/// Columns every uploaded file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COL, COUNTRY_COL, DOMAIN_COL, RATIO_COL];

/// The two optional classification columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    MainCategory,
    SubCategory,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 2] = [CategoryColumn::MainCategory, CategoryColumn::SubCategory];

    pub fn name(self) -> &'static str {
        match self {
            CategoryColumn::MainCategory => MAIN_CATEGORY_COL,
            CategoryColumn::SubCategory => SUB_CATEGORY_COL,
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of measurement data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: NaiveDateTime,
    pub country: String,
    pub domain: String,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    /// Empty or non-numeric cells are kept as `None` and plotted as gaps.
    pub v4_v5_ratio: Option<f64>,
}

impl Record {
    /// Main category, with the sentinel standing in for a missing value.
    pub fn main_category(&self) -> &str {
        self.main_category.as_deref().unwrap_or(UNKNOWN)
    }

    /// Sub category, with the sentinel standing in for a missing value.
    pub fn sub_category(&self) -> &str {
        self.sub_category.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn category(&self, column: CategoryColumn) -> Option<&str> {
        match column {
            CategoryColumn::MainCategory => self.main_category.as_deref(),
            CategoryColumn::SubCategory => self.sub_category.as_deref(),
        }
    }

    pub(crate) fn category_mut(&mut self, column: CategoryColumn) -> &mut Option<String> {
        match column {
            CategoryColumn::MainCategory => &mut self.main_category,
            CategoryColumn::SubCategory => &mut self.sub_category,
        }
    }
}

/// All uploaded files concatenated in upload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    has_main_category: bool,
    has_sub_category: bool,
}

impl Dataset {
    /// Build a dataset, stating which category columns the source carried.
    pub fn new(records: Vec<Record>, has_main_category: bool, has_sub_category: bool) -> Self {
        Self {
            records,
            has_main_category,
            has_sub_category,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, for the preview table.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Whether any source file carried this column.
    pub fn has_column(&self, column: CategoryColumn) -> bool {
        match column {
            CategoryColumn::MainCategory => self.has_main_category,
            CategoryColumn::SubCategory => self.has_sub_category,
        }
    }

    pub(crate) fn mark_column_present(&mut self, column: CategoryColumn) {
        match column {
            CategoryColumn::MainCategory => self.has_main_category = true,
            CategoryColumn::SubCategory => self.has_sub_category = true,
        }
    }

    /// Append another dataset's rows after this one's.
    pub fn append(&mut self, other: Dataset) {
        self.records.extend(other.records);
        self.has_main_category |= other.has_main_category;
        self.has_sub_category |= other.has_sub_category;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn record(
        day: u32,
        country: &str,
        domain: &str,
        main: Option<&str>,
        sub: Option<&str>,
        ratio: f64,
    ) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2021, 1, day)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            country: country.to_string(),
            domain: domain.to_string(),
            main_category: main.map(str::to_string),
            sub_category: sub.map(str::to_string),
            v4_v5_ratio: Some(ratio),
        }
    }

    #[test]
    fn category_accessors_fall_back_to_sentinel() {
        let r = record(1, "US", "a.com", None, Some("Video"), 1.0);
        assert_eq!(r.main_category(), UNKNOWN);
        assert_eq!(r.sub_category(), "Video");
    }

    #[test]
    fn append_keeps_order_and_merges_column_presence() {
        let mut first = Dataset::new(vec![record(1, "US", "a.com", Some("News"), None, 1.0)], true, false);
        let second = Dataset::new(vec![record(2, "FR", "b.fr", None, None, 0.5)], false, false);
        first.append(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.records()[1].domain, "b.fr");
        assert!(first.has_column(CategoryColumn::MainCategory));
        assert!(!first.has_column(CategoryColumn::SubCategory));
    }

    #[test]
    fn head_is_clamped_to_length() {
        let ds = Dataset::new(vec![record(1, "US", "a.com", None, None, 1.0)], false, false);
        assert_eq!(ds.head(5).len(), 1);
        assert!(Dataset::default().head(5).is_empty());
    }
}
