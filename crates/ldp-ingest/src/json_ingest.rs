//! JSON loading with one-level flattening.
//!
//! Accepts a top-level array of objects, or an object wrapping exactly one
//! array of objects (the events export uses the latter). Nested objects are
//! flattened one level into dotted keys; deeper values and arrays are kept
//! as their JSON text. Keys missing from a record become nulls.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde_json::Value;

use crate::csv_ingest::{check_exists, check_extension};
use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;

/// Load a JSON file into a DataFrame.
pub fn load_json(path: &Path) -> Result<DataFrame> {
    check_extension(path, "json")?;
    check_exists(path)?;

    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = tabular_records(value, path)?;
    let flat: Vec<Vec<(String, Value)>> = records.iter().map(flatten_record).collect();

    // Column order: first-seen across all records.
    let mut names: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for record in &flat {
        for (key, _) in record {
            if seen.insert(key.clone()) {
                names.push(key.clone());
            }
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in &names {
        columns.push(build_column(name, &flat));
    }
    let df = DataFrame::new(columns).map_err(|e| IngestError::Frame {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded JSON");
    Ok(df)
}

/// Extract the record list from the parsed document.
fn tabular_records(value: Value, path: &Path) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => {
            let mut arrays: Vec<Vec<Value>> = map
                .into_iter()
                .filter_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .collect();
            if arrays.len() == 1 {
                Ok(arrays.remove(0))
            } else {
                Err(IngestError::JsonShape {
                    path: path.to_path_buf(),
                    reason: "expected an array of records or an object with one array field"
                        .to_string(),
                })
            }
        }
        _ => Err(IngestError::JsonShape {
            path: path.to_path_buf(),
            reason: "top-level value is not an array or object".to_string(),
        }),
    }
}

/// Flatten one record a single level deep, producing dotted keys.
fn flatten_record(record: &Value) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    let Value::Object(map) = record else {
        // Scalar records get a single synthetic column.
        fields.push(("value".to_string(), record.clone()));
        return fields;
    };
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                for (inner_key, inner_value) in inner {
                    fields.push((format!("{key}.{inner_key}"), inner_value.clone()));
                }
            }
            other => fields.push((key.clone(), other.clone())),
        }
    }
    fields
}

fn field<'a>(record: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    record
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Build one column, numeric when every present value is a number.
fn build_column(name: &str, records: &[Vec<(String, Value)>]) -> Column {
    let all_numeric = records.iter().all(|record| {
        matches!(
            field(record, name),
            None | Some(Value::Null) | Some(Value::Number(_))
        )
    });

    if all_numeric {
        let values: Vec<Option<f64>> = records
            .iter()
            .map(|record| field(record, name).and_then(Value::as_f64))
            .collect();
        Series::new(name.into(), values).into()
    } else {
        let values: Vec<Option<String>> = records
            .iter()
            .map(|record| field(record, name).and_then(json_to_text))
            .collect();
        Series::new(name.into(), values).into()
    }
}

fn json_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), format_numeric)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_data.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_array_of_objects() {
        let (_dir, path) = write_temp(
            r#"[{"event_id": 1, "name": "Book club"}, {"event_id": 2, "name": "Story time"}]"#,
        );
        let df = load_json(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("event_id").is_ok());
        assert!(df.column("name").is_ok());
    }

    #[test]
    fn flattens_nested_objects_one_level() {
        let (_dir, path) = write_temp(
            r#"[{"event_id": 1, "venue": {"branch": "Central", "room": "A"}},
                {"event_id": 2, "venue": {"branch": "North"}}]"#,
        );
        let df = load_json(&path).unwrap();
        assert!(df.column("venue.branch").is_ok());
        // room missing from the second record becomes null
        assert_eq!(df.column("venue.room").unwrap().null_count(), 1);
    }

    #[test]
    fn unwraps_single_array_field() {
        let (_dir, path) = write_temp(r#"{"events": [{"event_id": 1}]}"#);
        let df = load_json(&path).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn rejects_non_tabular_documents() {
        let (_dir, path) = write_temp(r#""just a string""#);
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, IngestError::JsonShape { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json(&dir.path().join("events_data_incorrect.json")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
