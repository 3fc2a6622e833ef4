// Copyright 2025 Windowkit Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON table file tests

use std::fs;

use serde_json::json;
use tempfile::tempdir;
use windowkit::api::{read_table_file, table_from_json, table_to_json, write_table_file};
use windowkit::{DataType, Error, Value, WindowQuery};

const SALES: &str = r#"{
    "columns": ["region", {"name": "day", "type": "DATE"}, "amount"],
    "rows": [
        ["north", "2024-01-02", 120.5],
        ["south", "2024-01-01", 80.0],
        ["north", "2024-01-01", 99.0],
        ["south", "2024-01-02", null]
    ]
}"#;

#[test]
fn test_read_window_write() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sales.json");
    let output = dir.path().join("result.json");
    fs::write(&input, SALES).expect("Failed to write input");

    let table = read_table_file(&input).expect("Failed to read table");
    assert_eq!(table.len(), 4);
    let types: Vec<DataType> = table.schema().columns().iter().map(|c| c.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Text, DataType::Timestamp, DataType::Float]
    );

    let result = WindowQuery::new(&table)
        .window_sql(
            "ROW_NUMBER() OVER (PARTITION BY region ORDER BY day) AS rn, \
             LAG(amount, 1, 0.0) OVER (PARTITION BY region ORDER BY day) AS prev",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");
    write_table_file(&output, &result).expect("Failed to write result");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("Failed to read output"))
            .expect("Output is not JSON");
    assert_eq!(
        written["columns"],
        json!([
            {"name": "region", "type": "TEXT"},
            {"name": "day", "type": "TIMESTAMP"},
            {"name": "amount", "type": "FLOAT"},
            {"name": "rn", "type": "INTEGER"},
            {"name": "prev", "type": "FLOAT"}
        ])
    );
    assert_eq!(
        written["rows"],
        json!([
            ["north", "2024-01-02", 120.5, 2, 99.0],
            ["south", "2024-01-01", 80.0, 1, 0.0],
            ["north", "2024-01-01", 99.0, 1, 0.0],
            ["south", "2024-01-02", null, 2, 80.0]
        ])
    );

    // Written tables read back with the same schema and values
    let reread = read_table_file(&output).expect("Failed to reread");
    assert_eq!(reread, result);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = read_table_file(dir.path().join("absent.json")).expect_err("Expected IO error");
    assert!(matches!(err, Error::Io { .. }), "{:?}", err);
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"columns\": [").expect("Failed to write");
    let err = read_table_file(&path).expect_err("Expected JSON error");
    assert!(matches!(err, Error::Json(_)), "{:?}", err);
}

#[test]
fn test_bad_timestamp() {
    let err = table_from_json(&json!({
        "columns": [{"name": "t", "type": "TIMESTAMP"}],
        "rows": [["yesterday"]]
    }))
    .expect_err("Expected parse error");
    assert!(matches!(err, Error::Parse(_)), "{:?}", err);
}

#[test]
fn test_integer_and_float_mix() {
    // Integers and floats in one untyped column load as FLOAT
    let table = table_from_json(&json!({
        "columns": ["x"],
        "rows": [[null], [1.5], [2]]
    }))
    .expect("Failed to decode");
    assert_eq!(table.schema().columns()[0].data_type, DataType::Float);
    assert_eq!(table.rows()[2][0], Value::Float(2.0));
    assert_eq!(table_to_json(&table)["rows"], json!([[null], [1.5], [2.0]]));
}

#[test]
fn test_integer_then_float_column() {
    let table = table_from_json(&json!({
        "columns": ["v"],
        "rows": [[1], [2.5]]
    }))
    .expect("Failed to decode");
    assert_eq!(table.schema().columns()[0].data_type, DataType::Float);
    assert_eq!(table.rows()[0][0], Value::Float(1.0));
    assert_eq!(table.rows()[1][0], Value::Float(2.5));
}

#[test]
fn test_mixed_kinds_load_as_text() {
    let table = table_from_json(&json!({
        "columns": ["v"],
        "rows": [[1], ["two"]]
    }))
    .expect("Failed to decode");
    assert_eq!(table.schema().columns()[0].data_type, DataType::Text);
    assert_eq!(table.rows()[0][0], Value::text("1"));
}
