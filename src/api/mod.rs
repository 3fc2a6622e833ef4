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

//! High-level interface
//!
//! - [`WindowQuery`] - evaluate window calls written as SQL or built as specs
//! - [`json`] - load and save tables as JSON
//!
//! # Quick Start
//!
//! ```ignore
//! use windowkit::api::{read_table_file, WindowQuery};
//!
//! let table = read_table_file("sales.json")?;
//! let result = WindowQuery::new(&table)
//!     .window_sql("RANK() OVER (PARTITION BY region ORDER BY amount DESC) AS r")?
//!     .execute()?;
//! ```

pub mod json;
mod query;

pub use json::{read_table_file, table_from_json, table_to_json, value_to_json, write_table_file};
pub use query::WindowQuery;
