//! Filter Engine Module
//! Equality filters over the dataset and the distinct-value listings that
//! drive the dependent selection widgets.

use crate::data::record::{Dataset, Record, UNKNOWN};
use std::collections::HashSet;

/// Pure row filtering; nothing here mutates the dataset.
pub struct FilterEngine;

impl FilterEngine {
    /// Rows of `country`, narrowed by category and domain when given.
    ///
    /// A category of `None` or "Unknown" applies no restriction on that
    /// field. `Some(&[])` for `domains` matches nothing. Dataset order is kept.
    pub fn filter<'a>(
        dataset: &'a Dataset,
        country: &str,
        main_category: Option<&str>,
        sub_category: Option<&str>,
        domains: Option<&[String]>,
    ) -> Vec<&'a Record> {
        let main_category = Self::restriction(main_category);
        let sub_category = Self::restriction(sub_category);

        dataset
            .records()
            .iter()
            .filter(|r| r.country == country)
            .filter(|r| main_category.map_or(true, |m| r.main_category() == m))
            .filter(|r| sub_category.map_or(true, |s| r.sub_category() == s))
            .filter(|r| domains.map_or(true, |set| set.iter().any(|d| *d == r.domain)))
            .collect()
    }

    /// Distinct countries across the whole dataset.
    pub fn countries(dataset: &Dataset) -> Vec<String> {
        Self::distinct(dataset.records().iter().map(|r| r.country.as_str()))
    }

    /// Distinct main categories across the whole dataset.
    pub fn main_categories(dataset: &Dataset) -> Vec<String> {
        Self::distinct(dataset.records().iter().map(Record::main_category))
    }

    /// Distinct sub categories within `country`, narrowed to `main_category`
    /// when a specific one is chosen.
    pub fn sub_categories(
        dataset: &Dataset,
        country: &str,
        main_category: Option<&str>,
    ) -> Vec<String> {
        let rows = Self::filter(dataset, country, main_category, None, None);
        Self::distinct(rows.into_iter().map(Record::sub_category))
    }

    /// Distinct domains matching the country and category filters.
    pub fn domains(
        dataset: &Dataset,
        country: &str,
        main_category: Option<&str>,
        sub_category: Option<&str>,
    ) -> Vec<String> {
        let rows = Self::filter(dataset, country, main_category, sub_category, None);
        Self::distinct(rows.into_iter().map(|r| r.domain.as_str()))
    }

    fn restriction(category: Option<&str>) -> Option<&str> {
        category.filter(|c| *c != UNKNOWN)
    }

    /// Deduplicate, keeping first-seen order.
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        values
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}
