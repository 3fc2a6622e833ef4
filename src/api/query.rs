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

//! Builder over the parser and the window executor

use crate::core::{Result, Table, Value};
use crate::executor::{ExecutorConfig, WindowExecutor, WindowSpec};
use crate::parser::parse_window_list;

/// A table plus the window calls to evaluate over it
///
/// # Example
///
/// ```
/// use windowkit::{row, DataType, SchemaBuilder, Table, Value, WindowQuery};
///
/// let schema = SchemaBuilder::new()
///     .add("grp", DataType::Text)
///     .add("v", DataType::Integer)
///     .build()
///     .unwrap();
/// let table = Table::new(schema, vec![row!["A", 10], row!["A", 20], row!["B", 5]]).unwrap();
///
/// let result = WindowQuery::new(&table)
///     .window_sql("ROW_NUMBER() OVER (PARTITION BY grp ORDER BY v) AS rn")
///     .unwrap()
///     .execute()
///     .unwrap();
/// assert_eq!(
///     result.column_values("rn").unwrap(),
///     vec![Value::Integer(1), Value::Integer(2), Value::Integer(1)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WindowQuery<'a> {
    table: &'a Table,
    specs: Vec<WindowSpec>,
    config: ExecutorConfig,
}

impl<'a> WindowQuery<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            specs: Vec::new(),
            config: ExecutorConfig::default(),
        }
    }

    /// Add one window call
    pub fn window(mut self, spec: WindowSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Parse and add one or more comma-separated window calls
    pub fn window_sql(mut self, sql: &str) -> Result<Self> {
        self.specs.extend(parse_window_list(sql)?);
        Ok(self)
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn specs(&self) -> &[WindowSpec] {
        &self.specs
    }

    /// Input columns followed by one column per window call
    pub fn execute(&self) -> Result<Table> {
        WindowExecutor::new(self.config.clone()).execute(self.table, &self.specs)
    }

    /// Values of a single window call, without building a table
    pub fn evaluate(&self, spec: &WindowSpec) -> Result<Vec<Value>> {
        WindowExecutor::new(self.config.clone()).evaluate(self.table, spec)
    }
}
