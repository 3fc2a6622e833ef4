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

//! Window Executor
//!
//! # Components
//!
//! - [`WindowExecutor`] - runs window specifications over a table
//! - [`WindowSpec`] - one window function call with its OVER clause
//! - [`partition_rows`] - the partitioner
//! - [`OrderResolver`] - the per-partition sort and peer detection
//! - [`ExecutorConfig`] - parallelism thresholds

pub mod config;
pub mod ordering;
pub mod partition;
pub mod spec;
mod window;

pub use config::{ExecutorConfig, DEFAULT_PARALLEL_MIN_PARTITIONS, DEFAULT_PARALLEL_MIN_ROWS};
pub use ordering::OrderResolver;
pub use partition::{partition_rows, PartitionKey, Partitions};
pub use spec::{OrderByColumn, WindowFunctionKind, WindowSpec};
pub use window::WindowExecutor;
