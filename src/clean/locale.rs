//! Locale-aware numeric cell parsers.
//!
//! Ad-platform exports carry Brazilian-formatted numbers: `.` as the thousands
//! separator, `,` as the decimal separator (e.g. `1.234,56`), plus `$` and `%`
//! markers. Every parser here is total: text cells either parse to a number or
//! degrade to [`Value::Missing`]; numeric cells are normalized in place; any
//! other cell passes through unchanged (booleans in particular are never
//! treated as numbers).

use crate::types::Value;

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert an integral `f64` into an `i64`, refusing anything out of range.
///
/// `fract()` is non-zero for NaN and infinities, so both are refused along
/// with magnitudes beyond the `i64` range; an `as` cast would saturate those
/// to `i64::MAX`/`i64::MIN` instead of failing. The upper bound is exclusive
/// because 2^63 itself does not fit.
pub fn exact_int(v: f64) -> Option<i64> {
    const MIN: f64 = -9_223_372_036_854_775_808.0; // -(2^63), i64::MIN exactly
    const MAX_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if v.fract() == 0.0 && (MIN..MAX_EXCLUSIVE).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

/// Parse the separator-normalized text as a finite `f64`.
///
/// Empty input, digit-free input and overflow (the float parser maps
/// out-of-range literals to infinity) all come back as `None`.
fn parse_normalized(cleaned: &str) -> Option<f64> {
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse a currency cell.
///
/// Text cells are stripped of `$` and thousands `.`, `,` becomes `.`, and the
/// result is rounded to 2 decimals; unparseable text becomes
/// [`Value::Missing`]. `Float` cells are re-rounded to 2 decimals; `Int`,
/// `Bool` and `Missing` cells pass through unchanged.
pub fn clean_currency(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let cleaned = s.replace('$', "").replace('.', "").replace(',', ".");
            match parse_normalized(&cleaned) {
                Some(v) => Value::Float(round2(v)),
                None => Value::Missing,
            }
        }
        Value::Float(v) => Value::Float(round2(*v)),
        other => other.clone(),
    }
}

/// Parse a percentage cell into a fraction.
///
/// Text cells get the currency transform with `%` stripped instead of `$`;
/// the parsed percentage is rounded to 2 decimals *first* and divided by 100
/// second, so `"12,5%"` becomes `0.125`. Numeric cells are rounded to 2
/// decimals and are *not* divided; a cell that already holds a fraction
/// stays a fraction when fed through again.
pub fn clean_percentage(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let cleaned = s.replace('%', "").replace('.', "").replace(',', ".");
            match parse_normalized(&cleaned) {
                Some(v) => Value::Float(round2(v) / 100.0),
                None => Value::Missing,
            }
        }
        Value::Float(v) => Value::Float(round2(*v)),
        other => other.clone(),
    }
}

/// Parse an integer-like cell's text: strips thousands `.`, `,` becomes `.`,
/// no rounding.
///
/// The result stays a [`Value::Float`]; the coercion to integer cells happens
/// at the column level in [`crate::clean::clean_columns`]. Non-text cells
/// pass through unchanged.
pub fn clean_int_numeric(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let cleaned = s.replace('.', "").replace(',', ".");
            match parse_normalized(&cleaned) {
                Some(v) => Value::Float(v),
                None => Value::Missing,
            }
        }
        other => other.clone(),
    }
}

/// Parse a decimal cell: `,` becomes `.`, no thousands stripping, no rounding.
///
/// Non-text cells pass through unchanged.
pub fn clean_float_numeric(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let cleaned = s.replace(',', ".");
            match parse_normalized(&cleaned) {
                Some(v) => Value::Float(v),
                None => Value::Missing,
            }
        }
        other => other.clone(),
    }
}
