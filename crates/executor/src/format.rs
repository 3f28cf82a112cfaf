//! Result formatting.
//!
//! A result set becomes a pretty-printed JSON array, one object per record.
//! Indentation is two spaces and object keys are sorted, so the same rows
//! always produce the same text. Record order is the database's return order.

use graphgate_core::{ResultRecord, Value};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{Error, Result};

/// Format a result set as a JSON array string.
///
/// An empty set is `[]`. Fails with [`Error::Formatting`] if a float is NaN
/// or infinite, since JSON has no spelling for those.
pub fn format_records(records: &[ResultRecord]) -> Result<String> {
    let rows = records
        .iter()
        .map(record_to_json)
        .collect::<Result<Vec<_>>>()?;
    serde_json::to_string_pretty(&JsonValue::Array(rows)).map_err(|e| Error::Formatting {
        reason: e.to_string(),
    })
}

fn record_to_json(record: &ResultRecord) -> Result<JsonValue> {
    let mut object = Map::new();
    for (field, value) in record.iter() {
        object.insert(field.to_string(), value_to_json(field, value)?);
    }
    Ok(JsonValue::Object(object))
}

/// Convert a value, reporting the field a bad float came from.
pub fn value_to_json(field: &str, value: &Value) -> Result<JsonValue> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::Number(Number::from(*i)),
        Value::Float(f) => match Number::from_f64(*f) {
            Some(n) => JsonValue::Number(n),
            None => {
                return Err(Error::Formatting {
                    reason: format!("field '{}' holds non-finite float {}", field, f),
                })
            }
        },
        Value::String(s) => JsonValue::String(s.clone()),
        Value::List(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| value_to_json(field, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(map) => {
            let mut object = Map::new();
            for (k, v) in map {
                object.insert(k.clone(), value_to_json(field, v)?);
            }
            JsonValue::Object(object)
        }
    })
}
