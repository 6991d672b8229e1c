//! Shared fixtures for unit tests.

use crate::core::{CellValue, Table};
use serde_json::{Map, Value};

/// Rows `r1`, `r2` with `RMS = [0.2, 0.4]` and a textual `status` column.
pub fn rms_table() -> Table {
    Table::builder("Collection #", vec!["r1".into(), "r2".into()])
        .column("RMS", vec![CellValue::Number(0.2), CellValue::Number(0.4)])
        .column(
            "status",
            vec![CellValue::Text("abc123".into()), CellValue::Text("done".into())],
        )
        .build()
        .expect("fixture table is well formed")
}

/// Unwraps a `json!` object into an option mapping.
pub fn options(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
