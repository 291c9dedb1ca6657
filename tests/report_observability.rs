use std::sync::{Arc, Mutex};

use campaign_report_pipeline::enrich::{CountryFacts, InMemoryCountryData};
use campaign_report_pipeline::observability::{
    CompositeSink, Diagnostic, DiagnosticSink, FileSink,
};
use campaign_report_pipeline::report::{build_goal_share_report, ReportOptions};
use campaign_report_pipeline::source::read_csv_table_from_path;

#[derive(Default)]
struct RecordingSink {
    seen: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.seen.lock().unwrap().push(diagnostic.clone());
    }
}

#[test]
fn sink_receives_cell_parse_failures_from_cleaning() {
    let sink = Arc::new(RecordingSink::default());
    let options = ReportOptions { sink: Some(sink.clone()), ..Default::default() };

    let table = read_csv_table_from_path("tests/fixtures/ads_export.csv").unwrap();
    build_goal_share_report(table, None, &options).unwrap();

    // The fixture has exactly one dirty cell: Results = "abc".
    let seen = sink.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(matches!(
        &seen[0],
        Diagnostic::CellParseFailure { column, row: 4, raw }
            if column == "results" && raw == "abc"
    ));
}

#[test]
fn sink_receives_lookup_failures_from_enrichment() {
    let sink = Arc::new(RecordingSink::default());
    let options = ReportOptions { sink: Some(sink.clone()), ..Default::default() };

    // Only BR is known; US and AR lookups fail.
    let mut source = InMemoryCountryData::new();
    source.insert(
        "BR",
        CountryFacts {
            population: Some(212_559_417),
            gdp_per_capita: Some(8917.7),
            full_name: None,
        },
    );

    let table = read_csv_table_from_path("tests/fixtures/ads_export.csv").unwrap();
    build_goal_share_report(table, Some(&source), &options).unwrap();

    let seen = sink.seen.lock().unwrap();
    let lookup_failures = seen
        .iter()
        .filter(|d| matches!(d, Diagnostic::LookupFailure { .. }))
        .count();
    // Three lookups each for US and AR.
    assert_eq!(lookup_failures, 6);
    assert!(seen.iter().any(|d| matches!(
        d,
        Diagnostic::LookupFailure { entity, .. } if entity == "US"
    )));
}

#[test]
fn composite_sink_fans_out_to_every_sink() {
    let first = Arc::new(RecordingSink::default());
    let second = Arc::new(RecordingSink::default());
    let composite = CompositeSink::new(vec![
        first.clone() as Arc<dyn DiagnosticSink>,
        second.clone() as Arc<dyn DiagnosticSink>,
    ]);

    composite.report(&Diagnostic::CellParseFailure {
        column: "ctr".to_string(),
        row: 0,
        raw: "x".to_string(),
    });

    assert_eq!(first.seen.lock().unwrap().len(), 1);
    assert_eq!(second.seen.lock().unwrap().len(), 1);
}

#[test]
fn file_sink_appends_one_line_per_diagnostic() {
    let path = std::env::temp_dir().join(format!(
        "pipeline-diag-{}-{}.log",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let sink = FileSink::new(&path);
    sink.report(&Diagnostic::LookupFailure {
        entity: "Atlantis".to_string(),
        field: "country_population".to_string(),
        message: "no population data for 'Atlantis'".to_string(),
    });
    sink.report(&Diagnostic::CellParseFailure {
        column: "results".to_string(),
        row: 4,
        raw: "abc".to_string(),
    });

    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("lookup for 'Atlantis'"));
    assert!(lines[1].contains("column 'results'"));
}
