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

//! Schema types - column definitions for an in-memory table

use std::fmt;

use rustc_hash::FxHashMap;

use super::error::{Error, Result};
use super::types::DataType;

/// A column definition in a table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Column name as declared
    pub name: String,

    /// Data type of the column
    pub data_type: DataType,
}

impl SchemaColumn {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl fmt::Display for SchemaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// Ordered list of columns with case-insensitive lookup
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<SchemaColumn>,
    /// Lowercase column name -> position
    index_map: FxHashMap<String, usize>,
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

impl Schema {
    /// Create a schema, rejecting duplicate column names
    pub fn new(columns: Vec<SchemaColumn>) -> Result<Self> {
        let mut schema = Self {
            columns: Vec::with_capacity(columns.len()),
            index_map: FxHashMap::default(),
        };
        for column in columns {
            schema.add_column(column)?;
        }
        Ok(schema)
    }

    /// Append a column
    pub fn add_column(&mut self, column: SchemaColumn) -> Result<()> {
        let lower = column.name.to_lowercase();
        if self.index_map.contains_key(&lower) {
            return Err(Error::DuplicateColumn(column.name));
        }
        self.index_map.insert(lower, self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has any columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All column definitions in order
    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// Get a column by index
    pub fn get_column(&self, index: usize) -> Option<&SchemaColumn> {
        self.columns.get(index)
    }

    /// Get the column index by name (case-insensitive)
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.index_map.get(&name.to_lowercase()).copied()
    }

    /// Resolve a column name to its index or fail with `ColumnNotFound`
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.get_column_index(name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Check if a column exists by name
    pub fn has_column(&self, name: &str) -> bool {
        self.get_column_index(name).is_some()
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Validate that a row has as many values as the schema has columns
    pub fn validate_column_count(&self, got: usize) -> Result<()> {
        if got != self.columns.len() {
            return Err(Error::table_columns_not_match(self.columns.len(), got));
        }
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", col)?;
        }
        write!(f, ")")
    }
}

/// Builder for creating schemas more ergonomically
#[derive(Default)]
pub struct SchemaBuilder {
    columns: Vec<SchemaColumn>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column
    pub fn add(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(SchemaColumn::new(name, data_type));
        self
    }

    /// Build the schema
    pub fn build(self) -> Result<Schema> {
        Schema::new(self.columns)
    }
}
