//! Integration tests for the load → normalize → filter → chart pipeline.
//!
//! Uploads are built in memory; one test goes through the file system with
//! tempfile to cover `UploadedFile::from_path`.

use std::io::Write;

use v4v5_dashboard::charts::ChartBuilder;
use v4v5_dashboard::data::{
    CategoryNormalizer, DataLoader, FilterEngine, LoadedData, LoaderError, Selection,
    UploadedFile, UNKNOWN,
};

const US_FILE: &str = "\
date,country,domain,v4_v5_ratio,main_category
2021-01-01,US,a.com,1.2,News
2021-01-02,US,a.com,1.5,News
";

const FR_FILE: &str = "\
date,country,domain,v4_v5_ratio
2021-01-01,FR,b.fr,0.8
";

fn scenario() -> LoadedData {
    LoadedData::from_files(&[
        UploadedFile::new("us.csv", US_FILE),
        UploadedFile::new("fr.csv", FR_FILE),
    ])
    .unwrap()
}

// ---------------------------------------------------------------------------
// Two uploads, the second without category columns
// ---------------------------------------------------------------------------
#[test]
fn scenario_combined_dataset() {
    let loaded = scenario();
    let ds = &loaded.dataset;

    assert_eq!(ds.len(), 3);
    let fr = &ds.records()[2];
    assert_eq!(fr.domain, "b.fr");
    assert_eq!(fr.main_category.as_deref(), Some(UNKNOWN));
    assert_eq!(fr.sub_category.as_deref(), Some(UNKNOWN));
    // sub_category is absent from every file, main_category only from one
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].column.name(), "sub_category");
}

#[test]
fn scenario_filters_by_country_and_category() {
    let loaded = scenario();
    let ds = &loaded.dataset;

    let us_news = FilterEngine::filter(ds, "US", Some("News"), None, None);
    assert_eq!(us_news.len(), 2);
    assert!(us_news.iter().all(|r| r.domain == "a.com"));
    assert!(us_news[0].date < us_news[1].date);

    let fr = FilterEngine::filter(ds, "FR", None, None, None);
    assert_eq!(fr.len(), 1);
    assert_eq!(fr[0].main_category(), UNKNOWN);
}

#[test]
fn scenario_chart() {
    let loaded = scenario();
    let mut selection = Selection::new("US");
    selection.set_main_category("News");
    selection.set_domain("a.com", true);

    let chart = selection.chart(&loaded.dataset);
    assert_eq!(chart.series.len(), 1);
    let values: Vec<Option<f64>> = chart.series[0].points.iter().map(|p| p.value).collect();
    assert_eq!(values, [Some(1.2), Some(1.5)]);

    // nothing selected, nothing plotted
    let nothing = Selection::new("US").chart(&loaded.dataset);
    assert!(nothing.series.is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------
#[test]
fn disjoint_files_concatenate_chronologically() {
    let early = "date,country,domain,v4_v5_ratio\n\
                 2021-01-03,US,a.com,1\n2021-01-01,US,a.com,2\n";
    let late = "date,country,domain,v4_v5_ratio\n\
                 2021-02-01,US,a.com,3\n2021-02-02,US,a.com,4\n2021-02-03,US,a.com,5\n";
    let ds = DataLoader::concat_files(&[
        UploadedFile::new("late.csv", late),
        UploadedFile::new("early.csv", early),
    ])
    .unwrap();

    assert_eq!(ds.len(), 5);
    let mut dates: Vec<_> = ds.records().iter().map(|r| r.date).collect();
    dates.sort();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn padded_cells_load_like_clean_ones() {
    let ds = DataLoader::concat_files(&[
        UploadedFile::new("clean.csv", "date,country,domain,v4_v5_ratio\n2021-01-01,US,a.com,1.5\n"),
        UploadedFile::new("padded.csv", "date,country,domain,v4_v5_ratio\n2021-01-02,US ,a.com, 1.5\n"),
    ])
    .unwrap();

    assert_eq!(FilterEngine::countries(&ds), ["US"]);
    assert!(ds.records().iter().all(|r| r.v4_v5_ratio == Some(1.5)));
}

#[test]
fn chart_points_are_sorted_across_files() {
    let ds = DataLoader::concat_files(&[
        UploadedFile::new("b.csv", "date,country,domain,v4_v5_ratio\n2021-03-01,US,a.com,3\n"),
        UploadedFile::new("a.csv", "date,country,domain,v4_v5_ratio\n2021-01-01,US,a.com,1\n"),
    ])
    .unwrap();
    let rows = FilterEngine::filter(&ds, "US", None, None, None);
    let chart = ChartBuilder::build(&rows, "US", None, None, &["a.com".to_string()]);

    let dates: Vec<_> = chart.series[0].points.iter().map(|p| p.date).collect();
    assert!(dates[0] < dates[1]);
}

#[test]
fn normalization_is_idempotent_after_load() {
    let loaded = scenario();
    let mut again = loaded.dataset.clone();
    let warnings = CategoryNormalizer::normalize(&mut again);

    assert_eq!(again, loaded.dataset);
    assert!(warnings.is_empty());
    assert!(again
        .records()
        .iter()
        .all(|r| r.main_category.is_some() && r.sub_category.is_some()));
}

#[test]
fn sentinel_never_narrows_more_than_a_category() {
    let loaded = scenario();
    for country in FilterEngine::countries(&loaded.dataset) {
        let all = FilterEngine::filter(&loaded.dataset, &country, Some(UNKNOWN), None, None);
        for main in FilterEngine::main_categories(&loaded.dataset) {
            let narrowed = FilterEngine::filter(&loaded.dataset, &country, Some(main.as_str()), None, None);
            assert!(all.len() >= narrowed.len());
            assert!(narrowed.iter().all(|r| r.country == country));
        }
    }
}

#[test]
fn empty_domain_set_plots_no_points() {
    let loaded = scenario();
    let rows = FilterEngine::filter(&loaded.dataset, "US", None, None, Some(&[][..]));
    let chart = ChartBuilder::build(&rows, "US", None, None, &[]);
    assert!(chart.series.iter().all(|s| s.points.is_empty()));
    assert!(chart.is_empty());
}

// ---------------------------------------------------------------------------
// Errors and caching
// ---------------------------------------------------------------------------
#[test]
fn missing_domain_column_aborts_load() {
    let err = LoadedData::from_files(&[
        UploadedFile::new("us.csv", US_FILE),
        UploadedFile::new("broken.csv", "date,country,v4_v5_ratio\n2021-01-01,US,1\n"),
    ])
    .unwrap_err();

    assert!(matches!(err, LoaderError::MissingColumn { column: "domain", .. }));
    assert!(err.to_string().contains("broken.csv"));
}

#[test]
fn loader_reads_from_disk_and_memoizes() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(US_FILE.as_bytes()).unwrap();
    tmp.flush().unwrap();

    let upload = UploadedFile::from_path(tmp.path()).unwrap();
    let mut loader = DataLoader::new();
    let key = {
        loader.load(std::slice::from_ref(&upload)).unwrap();
        loader.current_key().cloned()
    };
    assert_eq!(loader.parse_count(), 1);

    // re-reading the unchanged file hits the cache
    let again = UploadedFile::from_path(tmp.path()).unwrap();
    assert_eq!(loader.load(&[again]).unwrap().dataset.len(), 2);
    assert_eq!(loader.current_key().cloned(), key);
    assert_eq!(loader.parse_count(), 1);

    // editing it on disk forces a re-parse
    tmp.write_all(b"2021-01-03,US,a.com,1.7,News\n").unwrap();
    tmp.flush().unwrap();
    let edited = UploadedFile::from_path(tmp.path()).unwrap();
    assert_eq!(loader.load(&[edited]).unwrap().dataset.len(), 3);
    assert_ne!(loader.current_key().cloned(), key);
    assert_eq!(loader.parse_count(), 2);
}
