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

//! Core types and definitions for Windowkit
//!
//! - [`DataType`] - scalar types (INTEGER, TEXT, FLOAT, ...)
//! - [`Value`] - runtime values with type information
//! - [`Row`] - positional collection of values
//! - [`Schema`] / [`SchemaColumn`] - column definitions
//! - [`Table`] - schema plus rows in input order
//! - [`Error`] - error type for every operation

pub mod error;
pub mod row;
pub mod schema;
pub mod table;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use schema::{Schema, SchemaBuilder, SchemaColumn};
pub use table::Table;
pub use types::{DataType, NullOrdering, SortDirection};
pub use value::{parse_timestamp, Value};
