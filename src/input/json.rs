//! JSON telemetry parsing
//!
//! Input is an array of objects. Strings and numbers become raw values,
//! nulls are dropped so the validator sees the field as missing, and any
//! other JSON kind is kept as text to fail the type check.

use serde_json::Value;

use super::InputError;
use crate::telemetry::{RawRow, RawValue};

pub fn parse_json(data: &str) -> Result<Vec<RawRow>, InputError> {
    let value: Value = serde_json::from_str(data.trim_start_matches('\u{feff}'))?;
    let items = value.as_array().ok_or(InputError::NotAnArray)?;
    if items.is_empty() {
        return Err(InputError::Empty);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row_number = index + 1;
            let object = item
                .as_object()
                .ok_or(InputError::NotAnObject { row: row_number })?;

            let mut row = RawRow::new(row_number);
            for (name, value) in object {
                if let Some(raw) = to_raw_value(value) {
                    row.insert(name.as_str(), raw);
                }
            }
            Ok(row)
        })
        .collect()
}

fn to_raw_value(value: &Value) -> Option<RawValue> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) => RawValue::Number(f),
            None => RawValue::Text(n.to_string()),
        }),
        Value::String(s) => Some(RawValue::Text(s.clone())),
        other => Some(RawValue::Text(other.to_string())),
    }
}
