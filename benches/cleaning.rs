use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use campaign_report_pipeline::campaign::{add_goal_columns, ClassifierConfig};
use campaign_report_pipeline::clean::{clean_columns, ColumnRoles};
use campaign_report_pipeline::column_map::to_standard_english;
use campaign_report_pipeline::report::{build_goal_share_report, ReportOptions};
use campaign_report_pipeline::types::{Table, Value};

const ROWS: usize = 10_000;

fn synthetic_export(rows: usize) -> Table {
    let countries = ["BR", "US", "AR", "PT", "MX"];
    let names = [
        "LC Conversion - 10/03/2024 - BR",
        "LC Cart- Conversion - 12/03/2024",
        "Viewed - 01/03/2024",
        "Brand Awareness - 05/02/2024",
        "Instagram Post – BR",
    ];

    let mut table = Table::new([
        "Ad Set Name",
        "Country",
        "Result Rate",
        "Results",
        "Frequency",
        "Purchase (Facebook Pixel)",
        "Amount Spent (USD)",
        "Purchase Conversion Value (Facebook Pixel)",
    ]);
    for i in 0..rows {
        table
            .push_row(vec![
                Value::Text(names[i % names.len()].to_string()),
                Value::Text(countries[i % countries.len()].to_string()),
                Value::Text(format!("{},{}%", i % 9, i % 100)),
                Value::Text(format!("{}", i % 500)),
                Value::Text(format!("1,{}", i % 10)),
                Value::Text(format!("{},0", i % 7)),
                Value::Text(format!("${}.{:03},00", i % 9 + 1, i % 1000)),
                Value::Text(format!("${},50", i % 900 + 100)),
            ])
            .expect("row arity");
    }
    table
}

fn bench_clean_columns(c: &mut Criterion) {
    let mut export = synthetic_export(ROWS);
    to_standard_english(&mut export);
    let roles = ColumnRoles::default();

    c.bench_function("clean_columns_10k_rows", |b| {
        b.iter_batched(
            || export.clone(),
            |mut table| {
                let report = clean_columns(&mut table, &roles);
                black_box(report.cells_converted)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_goal_columns(c: &mut Criterion) {
    let mut export = synthetic_export(ROWS);
    to_standard_english(&mut export);
    let config = ClassifierConfig::default();

    c.bench_function("add_goal_columns_10k_rows", |b| {
        b.iter_batched(
            || export.clone(),
            |mut table| {
                add_goal_columns(&mut table, &config).expect("ad_set_name present");
                black_box(table.row_count())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_report(c: &mut Criterion) {
    let export = synthetic_export(ROWS);
    let options = ReportOptions::default();

    c.bench_function("build_goal_share_report_10k_rows", |b| {
        b.iter_batched(
            || export.clone(),
            |table| {
                let report = build_goal_share_report(table, None, &options).expect("report");
                black_box(report.row_count())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_clean_columns, bench_goal_columns, bench_full_report);
criterion_main!(benches);
