//! Input validation — structural and numeric sanity of incoming bars.
//!
//! Validation is fail-fast: the first offending row/field is reported and
//! nothing downstream runs. A successful pass returns typed `Bar`s, so
//! indicator code never sees unchecked JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::Bar;

/// Fields every bar must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 3] = ["close", "high", "low"];

/// Inclusive upper bound for any price field.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Strings must look like a plain ASCII decimal or scientific literal to be
/// coerced. `$` is end of text, so a trailing newline does not match.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^-?[0-9]+(\.[0-9]+)?(e[+-]?[0-9]+)?$").expect("numeric literal pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid data format.")]
    InvalidFormat,

    #[error("Invalid data. Batch is empty.")]
    EmptyBatch,

    #[error("Invalid data at index {index}. Row is not an object.")]
    RowNotObject { index: usize },

    #[error("Invalid data{}. '{field}' field not present.", at_index(.index))]
    MissingField {
        field: &'static str,
        index: Option<usize>,
    },

    #[error(
        "Invalid data{}. '{field}' value is not a valid number or out of bounds.",
        at_index(.index)
    )]
    InvalidValue {
        field: &'static str,
        index: Option<usize>,
    },
}

impl ValidationError {
    /// Offending field, when the failure is about a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Offending batch index, when the input was an array.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::RowNotObject { index } => Some(*index),
            ValidationError::MissingField { index, .. }
            | ValidationError::InvalidValue { index, .. } => *index,
            _ => None,
        }
    }
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Coerce a JSON value to a price.
///
/// Numbers are taken as-is; strings must match the strict literal pattern.
/// Returns `None` for anything non-finite or outside `[0, MAX_PRICE]`.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let num = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            if !NUMERIC_LITERAL.is_match(s) {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if num.is_finite() && (0.0..=MAX_PRICE).contains(&num) {
        Some(num)
    } else {
        None
    }
}

/// Validate a single bar object or an array of them.
///
/// A single object becomes a batch of one; errors for it carry no index.
pub fn validate(data: &Value) -> Result<Vec<Bar>, ValidationError> {
    match data {
        Value::Object(row) => Ok(vec![validate_row(row, None)?]),
        Value::Array(rows) => {
            if rows.is_empty() {
                return Err(ValidationError::EmptyBatch);
            }
            rows.iter()
                .enumerate()
                .map(|(index, row)| match row {
                    Value::Object(obj) => validate_row(obj, Some(index)),
                    _ => Err(ValidationError::RowNotObject { index }),
                })
                .collect()
        }
        _ => Err(ValidationError::InvalidFormat),
    }
}

fn validate_row(row: &Map<String, Value>, index: Option<usize>) -> Result<Bar, ValidationError> {
    let mut prices = [0.0; 3];
    for (slot, field) in prices.iter_mut().zip(REQUIRED_FIELDS) {
        let value = row
            .get(field)
            .ok_or(ValidationError::MissingField { field, index })?;
        *slot = coerce_price(value).ok_or(ValidationError::InvalidValue { field, index })?;
    }

    let extra = row
        .iter()
        .filter(|(key, _)| !REQUIRED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let [close, high, low] = prices;
    Ok(Bar {
        close,
        high,
        low,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_single_object_as_batch_of_one() {
        let bars = validate(&json!({"close": 10.5, "high": 11, "low": 10})).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[0].high, 11.0);
    }

    #[test]
    fn coerces_strict_numeric_strings() {
        let bars = validate(&json!([{"close": "1.5e2", "high": "151", "low": "149.25"}])).unwrap();
        assert_eq!(bars[0].close, 150.0);
        assert_eq!(bars[0].low, 149.25);
        assert_eq!(coerce_price(&json!("2E3")), Some(2000.0));
    }

    #[test]
    fn rejects_loose_numeric_strings() {
        for s in ["1.", ".5", "1,000", " 12", "0x10", "NaN", "inf", ""] {
            assert_eq!(coerce_price(&json!(s)), None, "{s:?} should be rejected");
        }
    }

    #[test]
    fn rejects_trailing_newline_and_non_ascii_digits() {
        for s in ["12\n", "12\r\n", "\u{0661}\u{0662}", "\u{FF11}\u{FF12}"] {
            assert_eq!(coerce_price(&json!(s)), None, "{s:?} should be rejected");
        }
        let err = validate(&json!([{"close": "12\n", "high": 13, "low": 11}])).unwrap_err();
        assert_eq!(err.field(), Some("close"));
        assert_eq!(err.index(), Some(0));
    }

    #[test]
    fn rejects_out_of_bounds_and_non_numbers() {
        assert_eq!(coerce_price(&json!(-0.01)), None);
        assert_eq!(coerce_price(&json!(1_000_000.01)), None);
        assert_eq!(coerce_price(&json!("-5")), None);
        assert_eq!(coerce_price(&json!("1e400")), None);
        assert_eq!(coerce_price(&json!(true)), None);
        assert_eq!(coerce_price(&Value::Null), None);
        assert_eq!(coerce_price(&json!(0)), Some(0.0));
        assert_eq!(coerce_price(&json!(1_000_000)), Some(1_000_000.0));
    }

    #[test]
    fn missing_field_names_field_and_index() {
        let err = validate(&json!([
            {"close": 1, "high": 2, "low": 0.5},
            {"close": 1, "low": 0.5}
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "high",
                index: Some(1)
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid data at index 1. 'high' field not present."
        );
    }

    #[test]
    fn single_object_errors_have_no_index() {
        let err = validate(&json!({"close": "abc", "high": 2, "low": 1})).unwrap_err();
        assert_eq!(err.field(), Some("close"));
        assert_eq!(err.index(), None);
        assert_eq!(
            err.to_string(),
            "Invalid data. 'close' value is not a valid number or out of bounds."
        );
    }

    #[test]
    fn reports_first_violation_only() {
        // Row 0 is missing `low`, row 1 is garbage: row 0 wins.
        let err = validate(&json!([{"close": 1, "high": 2}, "garbage"])).unwrap_err();
        assert_eq!(err.index(), Some(0));
        assert_eq!(err.field(), Some("low"));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(validate(&json!(42)), Err(ValidationError::InvalidFormat));
        assert_eq!(validate(&json!([])), Err(ValidationError::EmptyBatch));
        assert_eq!(
            validate(&json!([{"close": 1, "high": 1, "low": 1}, 7])),
            Err(ValidationError::RowNotObject { index: 1 })
        );
    }

    #[test]
    fn optional_fields_pass_through() {
        let bars = validate(&json!({"close": 1, "high": 2, "low": 0.5, "ts": "2024-01-01"})).unwrap();
        assert_eq!(bars[0].extra.len(), 1);
        assert_eq!(bars[0].extra["ts"], "2024-01-01");
    }
}
