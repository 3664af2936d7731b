//! Descriptive statistics over a record set.
//!
//! Records are open-ended JSON objects, so the field to summarize is
//! discovered: the primary observation field when it holds numbers,
//! otherwise the first field whose every non-null value is a number.
//!
//! Degenerate samples are handled as follows:
//! - no usable values: no statistics at all (`None`)
//! - one value: statistics with `std_dev` set to `None`
//! - two or more: sample standard deviation (n - 1 denominator)

use serde_json::Value;
use std::collections::HashSet;
use wris_api::models::{Record, Statistics};

/// Field WRIS uses for the primary observed value.
pub const PRIMARY_VALUE_FIELD: &str = "dataValue";

/// Summarize the records, preferring `preferred_field`.
///
/// Returns `None` when there are no records or no numeric field.
///
/// ```rust
/// use ingres::stats::summarize;
/// use serde_json::json;
///
/// let records: Vec<_> = [10, 20, 30]
///     .iter()
///     .map(|v| json!({"dataValue": v}).as_object().cloned().unwrap())
///     .collect();
///
/// let stats = summarize(&records, "dataValue").unwrap();
/// assert_eq!(stats.mean, 20.0);
/// assert_eq!(stats.count, 3);
/// ```
pub fn summarize(records: &[Record], preferred_field: &str) -> Option<Statistics> {
    if records.is_empty() {
        return None;
    }

    let field = select_field(records, preferred_field)?;
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.get(field))
        .filter_map(Value::as_f64)
        .collect();

    describe(field, &values)
}

/// Pick the field to summarize, or `None` if nothing is numeric.
pub fn select_field<'a>(records: &'a [Record], preferred_field: &'a str) -> Option<&'a str> {
    if is_uniformly_numeric(records, preferred_field) {
        return Some(preferred_field);
    }

    let mut checked: HashSet<&str> = HashSet::new();
    records
        .iter()
        .flat_map(|record| record.keys())
        .map(String::as_str)
        .filter(|key| checked.insert(*key))
        .find(|key| is_uniformly_numeric(records, key))
}

/// True when `field` occurs with at least one number and never with a
/// non-null, non-numeric value. Missing occurrences count as null.
fn is_uniformly_numeric(records: &[Record], field: &str) -> bool {
    let mut seen_number = false;
    for value in records.iter().filter_map(|record| record.get(field)) {
        match value {
            Value::Null => {}
            Value::Number(_) => seen_number = true,
            _ => return false,
        }
    }
    seen_number
}

fn describe(field: &str, values: &[f64]) -> Option<Statistics> {
    let count = values.len();
    if count == 0 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std_dev = (count > 1).then(|| {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squared / (count - 1) as f64).sqrt()
    });

    Some(Statistics {
        field: field.to_string(),
        mean,
        min,
        max,
        std_dev,
        count,
    })
}
