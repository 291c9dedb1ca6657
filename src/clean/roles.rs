//! Column-role configuration and table-level cleaning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clean::locale::{
    clean_currency, clean_float_numeric, clean_int_numeric, clean_percentage, exact_int, round2,
};
use crate::error::PipelineResult;
use crate::observability::Diagnostic;
use crate::types::{Table, Value};

/// How a column is cleaned. Resolved once per column from [`ColumnRoles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// `$`-marked locale numbers, rounded to 2 decimals.
    Currency,
    /// `%`-marked locale numbers, converted to fractions.
    Percentage,
    /// Locale numbers coerced to nullable integer cells.
    IntNumeric,
    /// Locale numbers rounded to 2 decimals.
    FloatNumeric,
    /// Column is left untouched.
    Passthrough,
}

/// Name-sets assigning a cleaning role to each column.
///
/// A name may appear in more than one set; [`ColumnRoles::role_of`] resolves
/// membership with a fixed precedence: currency, then percentage, then
/// integer, then float. Columns in no set are passthrough.
///
/// [`ColumnRoles::default`] reproduces the standard ad-export role sets; a
/// deployment can also keep its own sets in a JSON file and load them with
/// [`ColumnRoles::from_json_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Columns cleaned as currency.
    pub currency: Vec<String>,
    /// Columns cleaned as percentage fractions.
    pub percentage: Vec<String>,
    /// Columns cleaned and coerced to integer cells.
    pub int_numeric: Vec<String>,
    /// Columns cleaned as 2-decimal floats.
    pub float_numeric: Vec<String>,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            currency: [
                "cpc_link",
                "cpc_general",
                "cpc_geral",
                "cost_per_1000_people_reached",
                "cost_per_add_to_cart",
                "cost_per_initiate_checkout",
                "cost_per_purchase",
                "amount_spent",
                "purchase_conversion_value",
            ]
            .map(String::from)
            .to_vec(),
            percentage: ["result_rate", "ctr"].map(String::from).to_vec(),
            int_numeric: ["results", "links_clicks", "add_to_cart", "initiate_checkout"]
                .map(String::from)
                .to_vec(),
            // "initiate_checkout" is also in the integer set; precedence
            // resolves it to IntNumeric.
            float_numeric: ["reach", "frequency", "initiate_checkout", "purchase"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl ColumnRoles {
    /// Resolve the role for a column name. The first matching set wins, in
    /// the order currency → percentage → integer → float.
    pub fn role_of(&self, name: &str) -> ColumnRole {
        if self.currency.iter().any(|c| c == name) {
            ColumnRole::Currency
        } else if self.percentage.iter().any(|c| c == name) {
            ColumnRole::Percentage
        } else if self.int_numeric.iter().any(|c| c == name) {
            ColumnRole::IntNumeric
        } else if self.float_numeric.iter().any(|c| c == name) {
            ColumnRole::FloatNumeric
        } else {
            ColumnRole::Passthrough
        }
    }

    /// Load role sets from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Outcome of [`clean_columns`].
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Text cells replaced with a parsed numeric value.
    pub cells_converted: usize,
    /// Cells degraded to [`Value::Missing`], empty cells included.
    pub cells_degraded: usize,
    /// One entry per non-empty cell that failed to parse or coerce.
    pub diagnostics: Vec<Diagnostic>,
}

/// Clean every column of `table` according to its resolved role, in place.
///
/// - Currency, percentage and numeric columns run the matching parser from
///   [`crate::clean::locale`] element-wise.
/// - Integer columns are then coerced to integer cells; anything not
///   integral or not representable as `i64` becomes [`Value::Missing`],
///   never zero.
/// - Float columns are rounded to 2 decimals after parsing.
/// - Passthrough columns are left untouched.
///
/// Always succeeds: parse failures degrade to missing cells and are recorded
/// in the returned [`CleanReport`].
pub fn clean_columns(table: &mut Table, roles: &ColumnRoles) -> CleanReport {
    let mut report = CleanReport::default();

    let resolved: Vec<(usize, String, ColumnRole)> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (idx, name.clone(), roles.role_of(name)))
        .filter(|(_, _, role)| *role != ColumnRole::Passthrough)
        .collect();

    for (col_idx, name, role) in resolved {
        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let cleaned = apply_role(role, &row[col_idx]);
            let before = &row[col_idx];
            if cleaned.is_missing() && !before.is_missing() {
                report.cells_degraded += 1;
                let raw = before.to_string();
                if !raw.trim().is_empty() {
                    report.diagnostics.push(Diagnostic::CellParseFailure {
                        column: name.clone(),
                        row: row_idx,
                        raw,
                    });
                }
            } else if matches!(before, Value::Text(_))
                && matches!(cleaned, Value::Int(_) | Value::Float(_))
            {
                report.cells_converted += 1;
            }
            row[col_idx] = cleaned;
        }
    }

    report
}

fn apply_role(role: ColumnRole, cell: &Value) -> Value {
    match role {
        ColumnRole::Currency => clean_currency(cell),
        ColumnRole::Percentage => clean_percentage(cell),
        ColumnRole::IntNumeric => match clean_int_numeric(cell) {
            Value::Float(v) => exact_int(v).map_or(Value::Missing, Value::Int),
            other => other,
        },
        ColumnRole::FloatNumeric => match clean_float_numeric(cell) {
            Value::Float(v) => Value::Float(round2(v)),
            other => other,
        },
        ColumnRole::Passthrough => cell.clone(),
    }
}
