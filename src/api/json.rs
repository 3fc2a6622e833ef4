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

//! JSON table format
//!
//! ```json
//! {
//!   "columns": ["grp", {"name": "v", "type": "INTEGER"}],
//!   "rows": [["A", 1], ["B", null]]
//! }
//! ```
//!
//! A column given as a bare string takes its type from its non-null values:
//! FLOAT when integers and floats mix, TEXT when other kinds mix. Strings in
//! a TIMESTAMP column are parsed as timestamps or dates.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Number};

use crate::core::{
    parse_timestamp, DataType, Error, Result, Row, Schema, SchemaColumn, Table, Value,
};

/// Decode a table from its JSON representation
pub fn table_from_json(document: &serde_json::Value) -> Result<Table> {
    let object = document
        .as_object()
        .ok_or_else(|| Error::Json("table must be a JSON object".to_string()))?;

    let columns = object
        .get("columns")
        .and_then(|c| c.as_array())
        .ok_or_else(|| Error::Json("missing \"columns\" array".to_string()))?;

    let rows: &[serde_json::Value] = match object.get("rows") {
        None | Some(serde_json::Value::Null) => &[],
        Some(serde_json::Value::Array(rows)) => rows,
        Some(_) => return Err(Error::Json("\"rows\" must be an array".to_string())),
    };

    let mut raw_rows = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cells = row
            .as_array()
            .ok_or_else(|| Error::Json(format!("row {} is not an array", i)))?;
        if cells.len() != columns.len() {
            return Err(Error::table_columns_not_match(columns.len(), cells.len()));
        }
        raw_rows.push(cells);
    }

    let mut schema_columns = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let (name, declared) = column_header(column)?;
        let data_type = match declared {
            Some(data_type) => data_type,
            None => infer_type(raw_rows.iter().map(|cells| &cells[index])),
        };
        schema_columns.push(SchemaColumn::new(name, data_type));
    }
    let schema = Schema::new(schema_columns)?;

    let mut table_rows = Vec::with_capacity(raw_rows.len());
    for cells in raw_rows {
        let mut row = Row::with_capacity(cells.len());
        for (cell, column) in cells.iter().zip(schema.columns()) {
            row.push(json_to_value(cell, column)?);
        }
        table_rows.push(row);
    }

    Table::new(schema, table_rows)
}

/// Encode a table in the same shape [`table_from_json`] reads
pub fn table_to_json(table: &Table) -> serde_json::Value {
    let columns: Vec<serde_json::Value> = table
        .schema()
        .columns()
        .iter()
        .map(|c| json!({"name": c.name, "type": c.data_type.to_string()}))
        .collect();

    let rows: Vec<serde_json::Value> = table
        .rows()
        .iter()
        .map(|row| serde_json::Value::Array(row.iter().map(value_to_json).collect()))
        .collect();

    json!({ "columns": columns, "rows": rows })
}

/// Read a JSON table from a file
pub fn read_table_file(path: impl AsRef<Path>) -> Result<Table> {
    let text = fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&text)?;
    table_from_json(&document)
}

/// Write a table to a file as pretty-printed JSON
pub fn write_table_file(path: impl AsRef<Path>, table: &Table) -> Result<()> {
    let text = serde_json::to_string_pretty(&table_to_json(table))?;
    fs::write(path, text)?;
    Ok(())
}

/// Convert a value to JSON; timestamps become strings
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null(_) => serde_json::Value::Null,
        Value::Integer(i) => json!(i),
        // NaN and infinities have no JSON form
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => json!(s.as_ref()),
        Value::Boolean(b) => json!(b),
        Value::Timestamp(_) => json!(value.to_string()),
    }
}

fn column_header(column: &serde_json::Value) -> Result<(String, Option<DataType>)> {
    match column {
        serde_json::Value::String(name) => Ok((name.clone(), None)),
        serde_json::Value::Object(fields) => {
            let name = fields
                .get("name")
                .and_then(|n| n.as_str())
                .ok_or_else(|| Error::Json("column object needs a \"name\"".to_string()))?;
            let data_type = declared_type(fields)?;
            Ok((name.to_string(), data_type))
        }
        other => Err(Error::Json(format!("invalid column header: {}", other))),
    }
}

fn declared_type(fields: &Map<String, serde_json::Value>) -> Result<Option<DataType>> {
    match fields.get("type") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(name)) => Ok(Some(name.parse()?)),
        Some(other) => Err(Error::Json(format!("invalid column type: {}", other))),
    }
}

fn infer_type<'a>(cells: impl Iterator<Item = &'a serde_json::Value>) -> DataType {
    let mut inferred = DataType::Null;
    for cell in cells {
        let cell_type = match cell {
            serde_json::Value::Null => continue,
            serde_json::Value::Bool(_) => DataType::Boolean,
            serde_json::Value::Number(n) if n.is_i64() => DataType::Integer,
            serde_json::Value::Number(_) => DataType::Float,
            _ => DataType::Text,
        };
        inferred = match (inferred, cell_type) {
            (DataType::Null, t) => t,
            (a, b) if a == b => a,
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Text,
        };
    }
    inferred
}

fn json_to_value(cell: &serde_json::Value, column: &SchemaColumn) -> Result<Value> {
    let mismatch = || {
        Error::Json(format!(
            "value {} does not fit column '{}' of type {}",
            cell, column.name, column.data_type
        ))
    };

    let value = match (column.data_type, cell) {
        (data_type, serde_json::Value::Null) => Value::null(data_type),
        (DataType::Integer, serde_json::Value::Number(n)) => {
            Value::Integer(n.as_i64().ok_or_else(mismatch)?)
        }
        (DataType::Float, serde_json::Value::Number(n)) => {
            Value::Float(n.as_f64().ok_or_else(mismatch)?)
        }
        (DataType::Boolean, serde_json::Value::Bool(b)) => Value::Boolean(*b),
        (DataType::Text, serde_json::Value::String(s)) => Value::text(s.as_str()),
        (DataType::Text, serde_json::Value::Number(n)) => Value::text(n.to_string()),
        (DataType::Text, serde_json::Value::Bool(b)) => Value::text(b.to_string()),
        (DataType::Timestamp, serde_json::Value::String(s)) => {
            Value::Timestamp(parse_timestamp(s)?)
        }
        _ => return Err(mismatch()),
    };
    Ok(value)
}
