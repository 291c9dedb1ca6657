//! Core data model types for the pipeline.
//!
//! Ad-platform exports arrive as untyped tabular data; the pipeline works on an
//! in-memory [`Table`] whose cells are [`Value`]s. Columns start out as raw
//! text and are converted to typed numeric cells by [`crate::clean`].

use std::fmt;

use crate::error::{PipelineError, PipelineResult};

/// A single cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value. Also the degradation target for failed parses
    /// and failed lookups.
    Missing,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Text(String),
}

impl Value {
    /// Returns `true` for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell. `Int` and `Float` only; booleans are not
    /// treated as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of the cell. `Text` only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the cell's natural text form; [`Value::Missing`] renders as
    /// the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// In-memory table: insertion-ordered column names plus row-major cells.
///
/// Every row holds exactly `columns.len()` cells; constructors and row/column
/// setters enforce this. Renaming, cleaning, classification and enrichment
/// mutate a table in place; aggregation returns a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<C, S>(columns: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from column names and rows.
    ///
    /// # Errors
    ///
    /// [`PipelineError::SchemaMismatch`] if any row's cell count differs from
    /// the column count.
    pub fn with_rows<C, S>(columns: C, rows: Vec<Vec<Value>>) -> PipelineResult<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the index of a column by name, or a schema-mismatch error
    /// naming the columns the table does have.
    pub fn require_column(&self, name: &str) -> PipelineResult<usize> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::SchemaMismatch {
                message: format!(
                    "missing required column '{name}'. columns={:?}",
                    self.columns
                ),
            })
    }

    /// Iterate the cells of a column top to bottom, if the column exists.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// [`PipelineError::SchemaMismatch`] if the row's cell count differs from
    /// the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> PipelineResult<()> {
        if row.len() != self.columns.len() {
            return Err(PipelineError::SchemaMismatch {
                message: format!(
                    "row has {} cells, table has {} columns",
                    row.len(),
                    self.columns.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Set a column's cells, replacing the column if it already exists and
    /// appending it otherwise.
    ///
    /// # Errors
    ///
    /// [`PipelineError::SchemaMismatch`] if `values` does not have one cell
    /// per row.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> PipelineResult<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(PipelineError::SchemaMismatch {
                message: format!(
                    "column '{name}' has {} values for {} rows",
                    values.len(),
                    self.rows.len()
                ),
            });
        }
        match self.column_index(&name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Rename a column in place. Returns `false` (and changes nothing) when
    /// `from` is not present.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Table, Value};

    fn sample_table() -> Table {
        Table::with_rows(
            ["country", "results"],
            vec![
                vec![Value::Text("BR".to_string()), Value::Int(10)],
                vec![Value::Text("US".to_string()), Value::Int(4)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn with_rows_rejects_wrong_arity() {
        let err = Table::with_rows(["a", "b"], vec![vec![Value::Int(1)]]).unwrap_err();
        assert!(err.to_string().contains("schema mismatch"));
    }

    #[test]
    fn push_row_enforces_arity() {
        let mut table = sample_table();
        assert!(table.push_row(vec![Value::Int(1)]).is_err());
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn set_column_appends_then_replaces() {
        let mut table = sample_table();
        table
            .set_column("purchase", vec![Value::Float(1.0), Value::Float(2.0)])
            .unwrap();
        assert_eq!(table.columns, vec!["country", "results", "purchase"]);

        table
            .set_column("purchase", vec![Value::Float(9.0), Value::Float(8.0)])
            .unwrap();
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[0][2], Value::Float(9.0));
        assert_eq!(table.rows[1][2], Value::Float(8.0));
    }

    #[test]
    fn set_column_rejects_wrong_length() {
        let mut table = sample_table();
        assert!(table.set_column("purchase", vec![Value::Float(1.0)]).is_err());
    }

    #[test]
    fn column_iterates_cells_in_order() {
        let table = sample_table();
        let results: Vec<&Value> = table.column("results").unwrap().collect();
        assert_eq!(results, vec![&Value::Int(10), &Value::Int(4)]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn rename_column_is_best_effort() {
        let mut table = sample_table();
        assert!(table.rename_column("country", "pais"));
        assert!(!table.rename_column("not_there", "x"));
        assert_eq!(table.columns, vec!["pais", "results"]);
    }

    #[test]
    fn display_renders_missing_as_empty() {
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Text("ok".to_string()).to_string(), "ok");
    }
}
