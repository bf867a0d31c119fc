//! User selection and the choice lists that depend on it.

use crate::charts::{ChartBuilder, ChartSpec};
use crate::data::filter::FilterEngine;
use crate::data::record::{Dataset, Record, UNKNOWN};
use serde::Serialize;

/// Current choices. "Unknown" for either category means "all".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub country: String,
    pub main_category: String,
    pub sub_category: String,
    /// Ordered, without duplicates.
    pub domains: Vec<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            country: String::new(),
            main_category: UNKNOWN.to_string(),
            sub_category: UNKNOWN.to_string(),
            domains: Vec::new(),
        }
    }
}

impl Selection {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// The site list depends on the country, so changing it clears the sites.
    pub fn set_country(&mut self, country: &str) {
        if self.country != country {
            self.country = country.to_string();
            self.domains.clear();
        }
    }

    /// Invalidates the sub category and the site list.
    pub fn set_main_category(&mut self, main_category: &str) {
        if self.main_category != main_category {
            self.main_category = main_category.to_string();
            self.sub_category = UNKNOWN.to_string();
            self.domains.clear();
        }
    }

    /// Invalidates the site list.
    pub fn set_sub_category(&mut self, sub_category: &str) {
        if self.sub_category != sub_category {
            self.sub_category = sub_category.to_string();
            self.domains.clear();
        }
    }

    /// Add or remove a site, keeping selection order.
    pub fn set_domain(&mut self, domain: &str, selected: bool) {
        let position = self.domains.iter().position(|d| d == domain);
        match (selected, position) {
            (true, None) => self.domains.push(domain.to_string()),
            (false, Some(i)) => {
                self.domains.remove(i);
            }
            _ => {}
        }
    }

    pub fn is_domain_selected(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Rows for the chart: country, categories and the selected sites.
    pub fn filter<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        FilterEngine::filter(
            dataset,
            &self.country,
            Some(self.main_category.as_str()),
            Some(self.sub_category.as_str()),
            Some(self.domains.as_slice()),
        )
    }

    pub fn chart(&self, dataset: &Dataset) -> ChartSpec {
        let rows = self.filter(dataset);
        ChartBuilder::build(
            &rows,
            &self.country,
            Some(self.main_category.as_str()),
            Some(self.sub_category.as_str()),
            &self.domains,
        )
    }

    /// Snap the selection onto the available options.
    ///
    /// Falls back to the first country and to "Unknown" for categories that
    /// are no longer offered; drops sites that are no longer listed.
    pub fn reconcile(&mut self, options: &SelectionOptions) {
        if !options.countries.contains(&self.country) {
            let first = options.countries.first().cloned().unwrap_or_default();
            self.set_country(&first);
        }
        if !options.main_categories.contains(&self.main_category) {
            self.set_main_category(UNKNOWN);
        }
        if !options.sub_categories.contains(&self.sub_category) {
            self.set_sub_category(UNKNOWN);
        }
        self.domains.retain(|d| options.domains.contains(d));
    }
}

/// Values offered by each selector for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionOptions {
    pub countries: Vec<String>,
    /// Always starts with "Unknown", the "all" entry.
    pub main_categories: Vec<String>,
    /// Always starts with "Unknown", the "all" entry.
    pub sub_categories: Vec<String>,
    pub domains: Vec<String>,
}

impl SelectionOptions {
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let country = selection.country.as_str();
        let main = Some(selection.main_category.as_str());
        let sub = Some(selection.sub_category.as_str());

        Self {
            countries: FilterEngine::countries(dataset),
            main_categories: Self::with_sentinel(FilterEngine::main_categories(dataset)),
            sub_categories: Self::with_sentinel(FilterEngine::sub_categories(
                dataset, country, main,
            )),
            domains: FilterEngine::domains(dataset, country, main, sub),
        }
    }

    fn with_sentinel(mut values: Vec<String>) -> Vec<String> {
        values.retain(|v| v != UNKNOWN);
        values.insert(0, UNKNOWN.to_string());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::CategoryNormalizer;
    use crate::data::record::tests::record;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(
            vec![
                record(1, "US", "a.com", Some("News"), Some("Daily"), 1.2),
                record(1, "US", "c.com", Some("Shopping"), Some("Deals"), 0.4),
                record(1, "FR", "b.fr", None, None, 0.8),
                record(2, "US", "a.com", Some("News"), Some("Daily"), 1.5),
            ],
            true,
            true,
        );
        CategoryNormalizer::normalize(&mut ds);
        ds
    }

    #[test]
    fn main_category_change_invalidates_downstream_choices() {
        let mut sel = Selection::new("US");
        sel.set_sub_category("Daily");
        sel.set_domain("a.com", true);

        sel.set_main_category("News");
        assert_eq!(sel.sub_category, UNKNOWN);
        assert!(sel.domains.is_empty());

        sel.set_domain("a.com", true);
        sel.set_main_category("News");
        assert_eq!(sel.domains, ["a.com"]);
    }

    #[test]
    fn set_domain_keeps_order_without_duplicates() {
        let mut sel = Selection::new("US");
        sel.set_domain("b.com", true);
        sel.set_domain("a.com", true);
        sel.set_domain("b.com", true);
        assert_eq!(sel.domains, ["b.com", "a.com"]);

        sel.set_domain("b.com", false);
        assert_eq!(sel.domains, ["a.com"]);
        assert!(!sel.is_domain_selected("b.com"));
    }

    #[test]
    fn options_offer_sentinel_first() {
        let ds = dataset();
        let mut sel = Selection::new("US");
        sel.set_main_category("News");
        let options = SelectionOptions::compute(&ds, &sel);

        assert_eq!(options.countries, ["US", "FR"]);
        assert_eq!(options.main_categories, [UNKNOWN, "News", "Shopping"]);
        assert_eq!(options.sub_categories, [UNKNOWN, "Daily"]);
        assert_eq!(options.domains, ["a.com"]);
    }

    #[test]
    fn reconcile_snaps_to_available_options() {
        let ds = dataset();
        let mut sel = Selection::new("DE");
        sel.main_category = "Gone".to_string();
        sel.domains = vec!["a.com".to_string(), "nowhere.com".to_string()];

        let options = SelectionOptions::compute(&ds, &sel);
        sel.reconcile(&options);
        let options = SelectionOptions::compute(&ds, &sel);
        sel.reconcile(&options);

        assert_eq!(sel.country, "US");
        assert_eq!(sel.main_category, UNKNOWN);
        assert!(sel.domains.is_empty());
    }

    #[test]
    fn chart_uses_selected_domains_only() {
        let ds = dataset();
        let mut sel = Selection::new("US");
        sel.set_main_category("News");
        sel.set_domain("a.com", true);

        let spec = sel.chart(&ds);
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].points.len(), 2);
        assert_eq!(spec.title, "v4/v5 Numbers for Selected Sites in US - News - ");
    }
}
