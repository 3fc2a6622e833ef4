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

//! # Windowkit - SQL window functions over in-memory tables
//!
//! Windowkit evaluates SQL window functions over a table held in memory. Every
//! input row gets one output value per window call; rows are never collapsed
//! and the output keeps the input row order.
//!
//! ## Functions
//!
//! - **Ranking** - ROW_NUMBER, RANK, DENSE_RANK, PERCENT_RANK, CUME_DIST, NTILE
//! - **Offset** - LAG, LEAD with a signed offset and a default value
//!
//! ## Quick Start
//!
//! ```rust
//! use windowkit::{
//!     row, DataType, OrderByColumn, SchemaBuilder, Table, Value, WindowExecutor, WindowSpec,
//! };
//!
//! let schema = SchemaBuilder::new()
//!     .add("grp", DataType::Text)
//!     .add("k", DataType::Integer)
//!     .add("value", DataType::Integer)
//!     .build()
//!     .unwrap();
//! let table = Table::new(
//!     schema,
//!     vec![row!["A", 1, 10], row!["A", 2, 20], row!["A", 2, 15], row!["B", 1, 5]],
//! )
//! .unwrap();
//!
//! let rank = WindowSpec::rank()
//!     .partition_by("grp")
//!     .order_by(OrderByColumn::asc("k"))
//!     .alias("r");
//! let result = WindowExecutor::default().execute(&table, &[rank]).unwrap();
//!
//! let ranks: Vec<i64> = result
//!     .column_values("r")
//!     .unwrap()
//!     .iter()
//!     .filter_map(Value::as_int64)
//!     .collect();
//! assert_eq!(ranks, vec![1, 2, 2, 1]);
//! ```
//!
//! The same call can be written as SQL text:
//!
//! ```rust
//! let spec = windowkit::parse_window("RANK() OVER (PARTITION BY grp ORDER BY k) AS r").unwrap();
//! assert_eq!(spec.to_string(), "RANK() OVER (PARTITION BY grp ORDER BY k ASC) AS r");
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`DataType`], [`Value`], [`Row`], [`Schema`], [`Table`], [`Error`])
//! - [`functions`] - Window function implementations and the registry
//! - [`executor`] - Partitioning, ordering and evaluation
//! - [`parser`] - Window-call parser
//! - [`api`] - [`WindowQuery`] and JSON table I/O

pub mod api;
pub mod core;
pub mod executor;
pub mod functions;
pub mod parser;

// Re-export main types for convenience
pub use core::{
    parse_timestamp, DataType, Error, NullOrdering, Result, Row, Schema, SchemaBuilder,
    SchemaColumn, SortDirection, Table, Value,
};

// Re-export function types
pub use functions::{
    global_registry, FunctionDataType, FunctionInfo, FunctionRegistry, FunctionSignature,
    WindowFunction, WindowPartition,
};

// Re-export executor types
pub use executor::{ExecutorConfig, OrderByColumn, WindowExecutor, WindowFunctionKind, WindowSpec};

// Re-export parser entry points
pub use parser::{parse_window, parse_window_list, ParseError};

// Re-export API types
pub use api::{read_table_file, table_from_json, table_to_json, write_table_file, WindowQuery};
