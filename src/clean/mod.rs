//! Locale-aware cleaning: per-cell parsers plus table-level role application.
//!
//! The per-cell parsers in [`locale`] are total functions over
//! [`crate::types::Value`]; [`clean_columns`] applies them across a table
//! according to a [`ColumnRoles`] configuration.
//!
//! ## Example
//!
//! ```rust
//! use campaign_report_pipeline::clean::{clean_columns, ColumnRoles};
//! use campaign_report_pipeline::types::{Table, Value};
//!
//! let mut table = Table::with_rows(
//!     ["amount_spent", "results"],
//!     vec![vec![
//!         Value::Text("$1.234,56".to_string()),
//!         Value::Text("1.000".to_string()),
//!     ]],
//! )
//! .unwrap();
//!
//! let report = clean_columns(&mut table, &ColumnRoles::default());
//! assert_eq!(table.rows[0], vec![Value::Float(1234.56), Value::Int(1000)]);
//! assert_eq!(report.cells_converted, 2);
//! ```

pub mod locale;
pub mod roles;

pub use locale::{
    clean_currency, clean_float_numeric, clean_int_numeric, clean_percentage, exact_int, round2,
};
pub use roles::{clean_columns, CleanReport, ColumnRole, ColumnRoles};
