use campaign_report_pipeline::source::{
    read_csv_table_from_path, read_csv_table_from_reader, write_csv_table_to_path,
};
use campaign_report_pipeline::types::{Table, Value};

#[test]
fn read_csv_keeps_cells_untyped() {
    let table = read_csv_table_from_path("tests/fixtures/ads_export.csv").unwrap();

    assert_eq!(table.columns.len(), 12);
    assert_eq!(table.columns[0], "Ad Set Name");
    assert_eq!(table.row_count(), 5);

    // Locale formatting survives untouched for the cleaning stage.
    let spent = table.column_index("Amount Spent (USD)").unwrap();
    assert_eq!(table.rows[0][spent], Value::Text("$300,00".to_string()));
    let rate = table.column_index("Result Rate").unwrap();
    assert_eq!(table.rows[0][rate], Value::Text("2,5%".to_string()));

    // Blank fields come in as missing, not as empty text.
    assert_eq!(table.rows[4][rate], Value::Missing);
}

#[test]
fn read_csv_handles_quoted_locale_fields() {
    let input = "Country,Amount Spent (USD)\nBR,\"$1.234,56\"\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let table = read_csv_table_from_reader(&mut rdr).unwrap();

    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0][1], Value::Text("$1.234,56".to_string()));
}

#[test]
fn read_csv_trims_header_whitespace_only() {
    let input = " Country , Results \nBR, 30 \n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let table = read_csv_table_from_reader(&mut rdr).unwrap();

    assert_eq!(table.columns, vec!["Country", "Results"]);
    // Cell whitespace is the parsers' business, not the reader's.
    assert_eq!(table.rows[0][1], Value::Text(" 30 ".to_string()));
}

#[test]
fn written_tables_read_back() {
    let table = Table::with_rows(
        ["country", "results", "note"],
        vec![
            vec![Value::Text("BR".to_string()), Value::Int(42), Value::Missing],
            vec![
                Value::Text("US".to_string()),
                Value::Float(0.19),
                Value::Text("ok".to_string()),
            ],
        ],
    )
    .unwrap();

    let path = std::env::temp_dir().join(format!(
        "ads-roundtrip-{}-{}.csv",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    write_csv_table_to_path(&path, &table).unwrap();
    let back = read_csv_table_from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back.columns, vec!["country", "results", "note"]);
    // Everything reads back as text; missing cells stay missing.
    assert_eq!(back.rows[0][0], Value::Text("BR".to_string()));
    assert_eq!(back.rows[0][1], Value::Text("42".to_string()));
    assert_eq!(back.rows[0][2], Value::Missing);
    assert_eq!(back.rows[1][1], Value::Text("0.19".to_string()));
}

#[test]
fn read_csv_errors_on_missing_file() {
    let err = read_csv_table_from_path("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(err.to_string().contains("csv"));
}
