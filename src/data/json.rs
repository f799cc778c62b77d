use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use crate::error::{PrepError, Result};

use super::model::{LabeledPair, PairTable, Record, RecordTable, Value};

// ---------------------------------------------------------------------------
// Records-oriented JSON → tables
// ---------------------------------------------------------------------------

/// Expected JSON shape (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 0, "title": "usb cable", "price": 4.99 },
///   { "id": 1, "title": "hdmi cable", "price": null },
///   ...
/// ]
/// ```
impl RecordTable {
    pub fn from_json_records(root: &JsonValue) -> Result<Self> {
        let records = records_array(root)?;

        let mut out = Vec::with_capacity(records.len());
        for (row, rec) in records.iter().enumerate() {
            let obj = record_object(rec, row)?;
            let id = integer_field(obj, "id", row)?;

            let attributes: BTreeMap<String, Value> = obj
                .iter()
                .filter(|(key, _)| key.as_str() != "id")
                .map(|(key, val)| (key.clone(), json_to_value(val)))
                .collect();

            out.push(Record { id, attributes });
        }

        RecordTable::new(out)
    }
}

/// Pair rows carry `ltable_id`, `rtable_id` and the class column named by
/// `label_field`. Any other columns are ignored.
impl PairTable {
    pub fn from_json_records(root: &JsonValue, label_field: &str) -> Result<Self> {
        let records = records_array(root)?;

        let mut rows = Vec::with_capacity(records.len());
        for (row, rec) in records.iter().enumerate() {
            let obj = record_object(rec, row)?;
            rows.push(LabeledPair {
                ltable_id: integer_field(obj, "ltable_id", row)?,
                rtable_id: integer_field(obj, "rtable_id", row)?,
                label: integer_field(obj, label_field, row)?,
            });
        }

        Ok(PairTable::new(label_field, rows))
    }
}

fn records_array(root: &JsonValue) -> Result<&Vec<JsonValue>> {
    root.as_array().ok_or_else(|| PrepError::InvalidRecord {
        row: 0,
        reason: "expected top-level JSON array".into(),
    })
}

fn record_object(rec: &JsonValue, row: usize) -> Result<&Map<String, JsonValue>> {
    rec.as_object().ok_or_else(|| PrepError::InvalidRecord {
        row,
        reason: "not a JSON object".into(),
    })
}

/// Integer column value. Integral floats (`3.0`) are accepted since Pandas
/// writes them for integer columns that once held NaN.
fn integer_field(obj: &Map<String, JsonValue>, column: &str, row: usize) -> Result<i64> {
    let val = obj.get(column).ok_or_else(|| PrepError::MissingColumn {
        column: column.to_string(),
    })?;

    val.as_i64()
        .or_else(|| {
            val.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| PrepError::InvalidRecord {
            row,
            reason: format!("'{column}' is not an integer: {val}"),
        })
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}
