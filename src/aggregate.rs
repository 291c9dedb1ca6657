//! Percentage-of-total aggregation over classified campaign goals.

use std::collections::BTreeMap;

use crate::campaign::ClassifiedGoal;
use crate::clean::{exact_int, round2};
use crate::column_map::standard;
use crate::error::PipelineResult;
use crate::types::{Table, Value};

struct GroupTotals {
    key_cell: Value,
    results: f64,
    purchase: f64,
    conversion_value: f64,
    amount_spent: f64,
    count: usize,
}

impl GroupTotals {
    fn new(key_cell: Value) -> Self {
        GroupTotals {
            key_cell,
            results: 0.0,
            purchase: 0.0,
            conversion_value: 0.0,
            amount_spent: 0.0,
            count: 0,
        }
    }
}

/// Aggregate rows of one classified goal by `main_column`, expressing each
/// group's metric sums as a share of the goal's totals.
///
/// Rows whose `classified_campaign_goal` differs from `goal` are ignored, as
/// are rows whose `main_column` cell is missing. Missing metric cells
/// contribute nothing to their group's sum but the row still counts.
///
/// Grouping is typed: a text cell never merges with a numeric cell that
/// renders the same, while integer and float cells with equal values count
/// as one numeric key. A group's output cell is the first cell seen for its
/// key.
///
/// The output has one row per group, sorted by group key, with columns:
/// the group key, `classified_campaign_goal`, the four metric sums, `count`,
/// and a `pct_*` share (rounded to two decimals) for each of the five. When a
/// goal's total for some metric is zero every group's share of it is `0.0`
/// rather than a division error.
pub fn percentages_by_goal(
    table: &Table,
    main_column: &str,
    goal: ClassifiedGoal,
) -> PipelineResult<Table> {
    let key_idx = table.require_column(main_column)?;
    let class_idx = table.require_column(standard::CLASSIFIED_CAMPAIGN_GOAL)?;
    let results_idx = table.require_column(standard::RESULTS)?;
    let purchase_idx = table.require_column(standard::PURCHASE)?;
    let value_idx = table.require_column(standard::PURCHASE_CONVERSION_VALUE)?;
    let spent_idx = table.require_column(standard::AMOUNT_SPENT)?;

    let mut groups: BTreeMap<String, GroupTotals> = BTreeMap::new();
    for row in &table.rows {
        if row[class_idx].as_str() != Some(goal.as_str()) {
            continue;
        }
        let key_cell = &row[key_idx];
        if key_cell.is_missing() {
            continue;
        }
        let group = groups
            .entry(group_key(key_cell))
            .or_insert_with(|| GroupTotals::new(key_cell.clone()));
        if let Some(v) = row[results_idx].as_f64() {
            group.results += v;
        }
        if let Some(v) = row[purchase_idx].as_f64() {
            group.purchase += v;
        }
        if let Some(v) = row[value_idx].as_f64() {
            group.conversion_value += v;
        }
        if let Some(v) = row[spent_idx].as_f64() {
            group.amount_spent += v;
        }
        group.count += 1;
    }

    let total_results: f64 = groups.values().map(|g| g.results).sum();
    let total_purchase: f64 = groups.values().map(|g| g.purchase).sum();
    let total_value: f64 = groups.values().map(|g| g.conversion_value).sum();
    let total_spent: f64 = groups.values().map(|g| g.amount_spent).sum();
    let total_count: usize = groups.values().map(|g| g.count).sum();

    let mut out = Table::new([
        main_column,
        standard::CLASSIFIED_CAMPAIGN_GOAL,
        standard::RESULTS,
        standard::PURCHASE,
        standard::PURCHASE_CONVERSION_VALUE,
        standard::AMOUNT_SPENT,
        standard::COUNT,
        standard::PCT_RESULTS,
        standard::PCT_PURCHASE,
        standard::PCT_PURCHASE_CONVERSION_VALUE,
        standard::PCT_AMOUNT_SPENT,
        standard::PCT_COUNT,
    ]);
    for group in groups.values() {
        out.push_row(vec![
            group.key_cell.clone(),
            Value::Text(goal.as_str().to_string()),
            results_cell(group.results),
            Value::Float(group.purchase),
            Value::Float(group.conversion_value),
            Value::Float(group.amount_spent),
            Value::Int(group.count as i64),
            Value::Float(share(group.results, total_results)),
            Value::Float(share(group.purchase, total_purchase)),
            Value::Float(share(group.conversion_value, total_value)),
            Value::Float(share(group.amount_spent, total_spent)),
            Value::Float(share(group.count as f64, total_count as f64)),
        ])?;
    }
    Ok(out)
}

// Cells that render alike but hold different types (Int(1) vs Text("1"))
// must not merge; ints and floats share a tag so 1 and 1.0 group together.
fn group_key(cell: &Value) -> String {
    let tag = match cell {
        Value::Int(_) | Value::Float(_) => "num",
        Value::Bool(_) => "bool",
        _ => "text",
    };
    format!("{tag}:{cell}")
}

// Results cells are integers after cleaning, so their sums come back
// integral; keep them as ints when they fit, floats otherwise.
fn results_cell(sum: f64) -> Value {
    exact_int(sum).map_or(Value::Float(sum), Value::Int)
}

fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { round2(part / total) }
}
