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

//! In-memory table: a schema plus rows in input order

use super::error::{Error, Result};
use super::row::Row;
use super::schema::{Schema, SchemaColumn};
use super::types::DataType;
use super::value::Value;

/// A materialized table
///
/// Every row has exactly `schema.column_count()` values. Row order is the
/// input order and is what window results are aligned to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table, validating every row's width
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        for row in &rows {
            schema.validate_column_count(row.len())?;
        }
        Ok(Self { schema, rows })
    }

    /// Create an empty table with the given schema
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        self.schema.validate_column_count(row.len())?;
        self.rows.push(row);
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the table into its parts
    pub fn into_parts(self) -> (Schema, Vec<Row>) {
        (self.schema, self.rows)
    }

    /// Value at (row, column name)
    pub fn value(&self, row: usize, column: &str) -> Result<&Value> {
        let idx = self.schema.resolve(column)?;
        self.rows
            .get(row)
            .and_then(|r| r.get(idx))
            .ok_or_else(|| Error::invalid_argument(format!("row {} out of bounds", row)))
    }

    /// All values of one column, in row order
    pub fn column_values(&self, column: &str) -> Result<Vec<Value>> {
        let idx = self.schema.resolve(column)?;
        Ok(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Append a computed column; `values` must align with the rows
    pub fn append_column(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        values: Vec<Value>,
    ) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::invalid_argument(format!(
                "column has {} values but table has {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        self.schema.add_column(SchemaColumn::new(name, data_type))?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }
}
