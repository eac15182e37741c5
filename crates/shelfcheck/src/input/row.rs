//! Row representation shared by every pipeline stage.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{Result, ShelfcheckError};

/// A single record: column name → cell value, in column order.
///
/// Rows are never mutated by the pipeline; each stage produces new rows.
pub type Row = IndexMap<String, String>;

/// Build a row from `(column, value)` pairs.
pub fn row_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Headers of a row set, taken from the first row.
pub fn first_row_headers(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Every column name that appears in any row, in order of first appearance.
pub fn union_headers(rows: &[Row]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            seen.insert(key.as_str());
        }
    }
    seen.into_iter().map(String::from).collect()
}

/// Convert JSON records into rows.
///
/// Accepts an array of objects whose values are strings, numbers, booleans, or
/// null. Null becomes an empty cell; numbers and booleans use their JSON text.
pub fn rows_from_json(value: &Value) -> Result<Vec<Row>> {
    let records = value
        .as_array()
        .ok_or_else(|| ShelfcheckError::Config("expected a JSON array of records".to_string()))?;

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let object = record.as_object().ok_or_else(|| {
                ShelfcheckError::Config(format!("record {} is not a JSON object", idx + 1))
            })?;
            Ok(object
                .iter()
                .map(|(key, value)| (key.clone(), cell_text(value)))
                .collect())
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_union_headers_preserves_first_appearance() {
        let rows = vec![
            row_from_pairs([("a", "1"), ("b", "2")]),
            row_from_pairs([("b", "3"), ("c", "4")]),
        ];
        assert_eq!(union_headers(&rows), vec!["a", "b", "c"]);
        assert_eq!(first_row_headers(&rows), vec!["a", "b"]);
    }

    #[test]
    fn test_rows_from_json_primitives() {
        let value = json!([
            {"chain": "Tesco", "sales_value": 12.5, "promo": true, "note": null}
        ]);
        let rows = rows_from_json(&value).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["chain"], "Tesco");
        assert_eq!(rows[0]["sales_value"], "12.5");
        assert_eq!(rows[0]["promo"], "true");
        assert_eq!(rows[0]["note"], "");
    }

    #[test]
    fn test_rows_from_json_rejects_non_array() {
        assert!(rows_from_json(&json!({"chain": "Tesco"})).is_err());
        assert!(rows_from_json(&json!([1, 2])).is_err());
    }
}
