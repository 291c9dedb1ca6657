//! Getting tables in and out of the pipeline.
//!
//! Two transports are supported: CSV files (the ad platform's export format)
//! and spreadsheet-style raw value grids behind the [`RangeStore`] seam. Both
//! are untyped on the way in; cell typing happens later, during cleaning.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Table, Value};

impl Table {
    /// Build a table from a spreadsheet-style grid: one header row followed
    /// by data rows.
    ///
    /// Rows longer than the header are truncated; shorter rows are padded
    /// with missing cells. JSON nulls and blank strings become missing,
    /// numbers keep their integer/float split, and anything structured is
    /// kept as its JSON text.
    pub fn from_raw_values(grid: &[Vec<serde_json::Value>]) -> PipelineResult<Self> {
        let (header, data_rows) = grid.split_first().ok_or_else(|| {
            PipelineError::SchemaMismatch {
                message: "raw value grid is empty (expected a header row)".to_string(),
            }
        })?;

        let mut table = Table::new(header.iter().map(header_name));
        let width = table.columns.len();
        for raw_row in data_rows {
            let mut row: Vec<Value> = raw_row.iter().take(width).map(cell_from_json).collect();
            row.resize(width, Value::Missing);
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Render the table as a raw value grid, header row first.
    ///
    /// Missing cells export as `0`, matching the fill convention of the
    /// spreadsheets these grids are written back to.
    pub fn to_raw_values(&self) -> Vec<Vec<serde_json::Value>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.columns.iter().map(|c| serde_json::Value::from(c.as_str())).collect());
        for row in &self.rows {
            grid.push(row.iter().map(cell_to_json).collect());
        }
        grid
    }
}

fn header_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn cell_from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Missing,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                n.as_f64().map_or(Value::Missing, Value::Float)
            }
        }
        serde_json::Value::String(s) => {
            if s.trim().is_empty() {
                Value::Missing
            } else {
                Value::Text(s.clone())
            }
        }
        other => Value::Text(other.to_string()),
    }
}

fn cell_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Missing => serde_json::Value::from(0),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::from(0)),
        Value::Bool(b) => serde_json::Value::from(*b),
        Value::Text(s) => serde_json::Value::from(s.as_str()),
    }
}

/// Named ranges of raw values, addressed by id.
///
/// This is the seam a spreadsheet backend plugs into; the pipeline itself
/// only ever reads and writes whole ranges.
pub trait RangeStore {
    /// Fetch a range as a table.
    fn get(&self, range_id: &str) -> PipelineResult<Table>;

    /// Overwrite a range with the table's raw values.
    fn put(&mut self, range_id: &str, table: &Table) -> PipelineResult<()>;
}

/// [`RangeStore`] backed by a map, for tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryRangeStore {
    ranges: HashMap<String, Vec<Vec<serde_json::Value>>>,
}

impl InMemoryRangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a range with a raw grid.
    pub fn insert_raw(&mut self, range_id: impl Into<String>, grid: Vec<Vec<serde_json::Value>>) {
        self.ranges.insert(range_id.into(), grid);
    }

    /// Raw grid currently stored under `range_id`, if any.
    pub fn raw(&self, range_id: &str) -> Option<&[Vec<serde_json::Value>]> {
        self.ranges.get(range_id).map(Vec::as_slice)
    }
}

impl RangeStore for InMemoryRangeStore {
    fn get(&self, range_id: &str) -> PipelineResult<Table> {
        let grid = self.ranges.get(range_id).ok_or_else(|| PipelineError::RangeNotFound {
            range_id: range_id.to_string(),
        })?;
        Table::from_raw_values(grid)
    }

    fn put(&mut self, range_id: &str, table: &Table) -> PipelineResult<()> {
        self.ranges.insert(range_id.to_string(), table.to_raw_values());
        Ok(())
    }
}

/// Read a CSV file into an untyped table.
///
/// The first record is the header. Blank fields become missing cells; every
/// other field is kept as text for the cleaning stage to type.
pub fn read_csv_table_from_path(path: impl AsRef<Path>) -> PipelineResult<Table> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    read_csv_table_from_reader(&mut rdr)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_table_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> PipelineResult<Table> {
    let headers = rdr.headers()?.clone();
    let mut table = Table::new(headers.iter().map(str::trim));
    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    Value::Missing
                } else {
                    Value::Text(field.to_string())
                }
            })
            .collect();
        table.push_row(row)?;
    }
    Ok(table)
}

/// Write a table to a CSV file, header row first.
///
/// Missing cells are written as empty fields, not `0`.
pub fn write_csv_table_to_path(path: impl AsRef<Path>, table: &Table) -> PipelineResult<()> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    write_csv_table_to_writer(&mut wtr, table)
}

/// Write a table to an existing CSV writer.
pub fn write_csv_table_to_writer<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    table: &Table,
) -> PipelineResult<()> {
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
