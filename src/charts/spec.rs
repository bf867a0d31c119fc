//! Chart specification
//! Backend-neutral description of the v4/v5 line chart.

use crate::data::{Record, UNKNOWN};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "v4/v5 Values";
pub const LEGEND_TITLE: &str = "Sites";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDateTime,
    /// `None` draws as a gap.
    pub value: Option<f64>,
}

/// One site's line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
    pub series: Vec<LineSeries>,
}

impl ChartSpec {
    /// True when no series has a point to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Turns filtered rows into a [`ChartSpec`].
pub struct ChartBuilder;

impl ChartBuilder {
    /// One series per requested domain, in request order.
    ///
    /// A domain without rows still gets a named, empty series so it keeps its
    /// legend entry. Points are sorted by date since concatenated uploads are
    /// not globally ordered.
    pub fn build(
        rows: &[&Record],
        country: &str,
        main_category: Option<&str>,
        sub_category: Option<&str>,
        domains: &[String],
    ) -> ChartSpec {
        let series = domains
            .iter()
            .map(|domain| {
                let mut points: Vec<ChartPoint> = rows
                    .iter()
                    .filter(|r| r.domain == *domain)
                    .map(|r| ChartPoint {
                        date: r.date,
                        value: r.v4_v5_ratio,
                    })
                    .collect();
                points.sort_by_key(|p| p.date);

                LineSeries {
                    name: domain.clone(),
                    points,
                }
            })
            .collect();

        ChartSpec {
            title: Self::title(country, main_category, sub_category),
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
            legend_title: LEGEND_TITLE.to_string(),
            series,
        }
    }

    pub fn title(country: &str, main_category: Option<&str>, sub_category: Option<&str>) -> String {
        format!(
            "v4/v5 Numbers for Selected Sites in {} - {} - {}",
            country,
            Self::title_part(main_category),
            Self::title_part(sub_category)
        )
    }

    fn title_part(category: Option<&str>) -> &str {
        match category {
            Some(c) if c != UNKNOWN => c,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::tests::record;

    #[test]
    fn title_blanks_the_sentinel() {
        assert_eq!(
            ChartBuilder::title("US", Some("News"), Some(UNKNOWN)),
            "v4/v5 Numbers for Selected Sites in US - News - "
        );
        assert_eq!(
            ChartBuilder::title("FR", None, None),
            "v4/v5 Numbers for Selected Sites in FR -  - "
        );
    }

    #[test]
    fn series_follow_request_order_and_are_date_sorted() {
        let rows = [
            record(3, "US", "a.com", None, None, 3.0),
            record(1, "US", "b.com", None, None, 9.0),
            record(1, "US", "a.com", None, None, 1.0),
            record(2, "US", "a.com", None, None, 2.0),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let domains = vec!["b.com".to_string(), "a.com".to_string()];

        let spec = ChartBuilder::build(&refs, "US", None, None, &domains);

        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].name, "b.com");
        let values: Vec<Option<f64>> = spec.series[1].points.iter().map(|p| p.value).collect();
        assert_eq!(values, [Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(spec.x_axis_title, "Date");
        assert_eq!(spec.y_axis_title, "v4/v5 Values");
        assert_eq!(spec.legend_title, "Sites");
    }

    #[test]
    fn unmatched_domain_yields_empty_named_series() {
        let rows = [record(1, "US", "a.com", None, None, 1.0)];
        let refs: Vec<&Record> = rows.iter().collect();
        let spec = ChartBuilder::build(&refs, "US", None, None, &["z.com".to_string()]);

        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].name, "z.com");
        assert!(spec.is_empty());
    }

    #[test]
    fn no_domains_means_no_series() {
        let rows = [record(1, "US", "a.com", None, None, 1.0)];
        let refs: Vec<&Record> = rows.iter().collect();
        let spec = ChartBuilder::build(&refs, "US", None, None, &[]);
        assert!(spec.series.is_empty());
        assert_eq!(spec.point_count(), 0);
    }
}
