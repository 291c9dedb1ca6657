use campaign_report_pipeline::campaign::ClassifiedGoal;
use campaign_report_pipeline::report::{build_goal_share_report, ReportOptions};
use campaign_report_pipeline::source::read_csv_table_from_path;
use campaign_report_pipeline::types::Value;

fn fixture_table() -> campaign_report_pipeline::types::Table {
    read_csv_table_from_path("tests/fixtures/ads_export.csv").unwrap()
}

#[test]
fn fixture_export_aggregates_conversions_by_country() {
    let report = build_goal_share_report(fixture_table(), None, &ReportOptions::default()).unwrap();

    assert_eq!(
        report.columns,
        vec![
            "country",
            "classified_campaign_goal",
            "results",
            "purchase",
            "purchase_conversion_value",
            "amount_spent",
            "count",
            "pct_results",
            "pct_purchase",
            "pct_purchase_conversion_value",
            "pct_amount_spent",
            "pct_count",
        ]
    );

    // The Viewed row is engagement and the Brand Awareness row is "Outros";
    // only the three conversion ad sets (two countries) remain.
    assert_eq!(report.row_count(), 2);

    let br = &report.rows[0];
    assert_eq!(br[0], Value::Text("BR".to_string()));
    assert_eq!(br[1], Value::Text("Conversão".to_string()));
    assert_eq!(br[2], Value::Int(42));
    assert_eq!(br[3], Value::Float(5.0));
    assert_eq!(br[4], Value::Float(2140.5));
    assert_eq!(br[5], Value::Float(480.0));
    assert_eq!(br[6], Value::Int(2));
    assert_eq!(br[7], Value::Float(0.81));
    assert_eq!(br[8], Value::Float(0.83));
    assert_eq!(br[9], Value::Float(0.81));
    assert_eq!(br[10], Value::Float(0.83));
    assert_eq!(br[11], Value::Float(0.67));

    let us = &report.rows[1];
    assert_eq!(us[0], Value::Text("US".to_string()));
    assert_eq!(us[2], Value::Int(10));
    assert_eq!(us[6], Value::Int(1));
    assert_eq!(us[7], Value::Float(0.19));
    assert_eq!(us[8], Value::Float(0.17));
    assert_eq!(us[9], Value::Float(0.19));
    assert_eq!(us[10], Value::Float(0.17));
    assert_eq!(us[11], Value::Float(0.33));
}

#[test]
fn goal_filter_selects_other_buckets() {
    let options = ReportOptions {
        goal_filter: ClassifiedGoal::EngagementView,
        ..Default::default()
    };
    let report = build_goal_share_report(fixture_table(), None, &options).unwrap();

    assert_eq!(report.row_count(), 1);
    assert_eq!(report.rows[0][0], Value::Text("BR".to_string()));
    assert_eq!(report.rows[0][1], Value::Text("Engajamento/Visualização".to_string()));
    assert_eq!(report.rows[0][2], Value::Int(55));
    // A single group holds the whole total.
    assert_eq!(report.rows[0][7], Value::Float(1.0));
}

#[test]
fn localized_fixture_report_uses_portuguese_names() {
    let options = ReportOptions { localize_output: true, ..Default::default() };
    let report = build_goal_share_report(fixture_table(), None, &options).unwrap();

    assert_eq!(
        report.columns,
        vec![
            "pais",
            "objetivo_classificado_da_campanha",
            "resultados",
            "compra",
            "valor_conversao_compra",
            "valor_gasto",
            "count",
            "pct_results",
            "pct_purchase",
            "pct_purchase_conversion_value",
            "pct_amount_spent",
            "pct_count",
        ]
    );
    // Localization renames columns only; values are untouched.
    assert_eq!(report.rows[0][7], Value::Float(0.81));
}

#[test]
fn aggregating_by_age_band_reuses_the_same_flow() {
    let options = ReportOptions { main_column: "age".to_string(), ..Default::default() };
    let report = build_goal_share_report(fixture_table(), None, &options).unwrap();

    // Conversion rows: two in 25-34, one in 35-44.
    assert_eq!(report.row_count(), 2);
    assert_eq!(report.rows[0][0], Value::Text("25-34".to_string()));
    assert_eq!(report.rows[0][2], Value::Int(42));
    assert_eq!(report.rows[1][0], Value::Text("35-44".to_string()));
    assert_eq!(report.rows[1][2], Value::Int(10));
}
