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

//! Window Function System
//!
//! - [`WindowFunction`] - trait implemented by every window function
//! - [`WindowPartition`] - one ordered partition handed to a function
//! - [`FunctionRegistry`] - name lookup and argument validation

pub mod registry;
pub mod window;

use crate::core::{DataType, Error, Result, Value};

/// Data type for function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionDataType {
    /// Any type
    Any,
    /// Integer type
    Integer,
    /// Float type
    Float,
    /// Column reference whose type passes through to the result
    Column,
}

impl FunctionDataType {
    /// Concrete output type, given the type of the argument column (if any)
    pub fn resolve(&self, column_type: Option<DataType>) -> DataType {
        match self {
            FunctionDataType::Integer => DataType::Integer,
            FunctionDataType::Float => DataType::Float,
            FunctionDataType::Column | FunctionDataType::Any => {
                column_type.unwrap_or(DataType::Null)
            }
        }
    }
}

/// Function signature information
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: FunctionDataType,
    /// Argument types
    pub argument_types: Vec<FunctionDataType>,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments
    pub max_args: usize,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        return_type: FunctionDataType,
        argument_types: Vec<FunctionDataType>,
        min_args: usize,
        max_args: usize,
    ) -> Self {
        Self {
            return_type,
            argument_types,
            min_args,
            max_args,
        }
    }

    /// Validate argument count
    pub fn validate_arg_count(&self, count: usize) -> Result<()> {
        if count < self.min_args {
            return Err(Error::invalid_argument(format!(
                "expected at least {} arguments, got {}",
                self.min_args, count
            )));
        }
        if count > self.max_args {
            return Err(Error::invalid_argument(format!(
                "expected at most {} arguments, got {}",
                self.max_args, count
            )));
        }
        Ok(())
    }
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Description
    pub description: String,
    /// Signature
    pub signature: FunctionSignature,
    /// Whether the window specification must carry an ORDER BY
    pub requires_order_by: bool,
}

impl FunctionInfo {
    /// Create a new function info
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: FunctionSignature,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            signature,
            requires_order_by: false,
        }
    }

    /// Mark the function as needing ORDER BY (ranking functions)
    pub fn ordered(mut self) -> Self {
        self.requires_order_by = true;
        self
    }

    /// Get the function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the signature
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// One partition, already sorted, as seen by a window function
///
/// Row `i` here is the i-th row in window order, not in input order.
#[derive(Debug, Clone, Copy)]
pub struct WindowPartition<'a> {
    len: usize,
    /// Argument column values in window order (empty for functions without one)
    values: &'a [Value],
    /// `ties[i]` is true when row `i` has the same ordering key as row `i - 1`
    ties: &'a [bool],
}

impl<'a> WindowPartition<'a> {
    /// Create a partition view
    ///
    /// `values` and `ties` are either empty or exactly `len` long.
    pub fn new(len: usize, values: &'a [Value], ties: &'a [bool]) -> Self {
        debug_assert!(values.is_empty() || values.len() == len);
        debug_assert!(ties.is_empty() || ties.len() == len);
        Self { len, values, ties }
    }

    /// Number of rows in the partition
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Argument value at window position `i`, NULL when there is none
    pub fn value(&self, i: usize) -> Value {
        self.values.get(i).cloned().unwrap_or_else(Value::null_unknown)
    }

    /// True when row `i` ties with row `i - 1` on every ordering key.
    /// Row 0 never ties, and without ORDER BY no row does.
    pub fn ties_previous(&self, i: usize) -> bool {
        i > 0 && self.ties.get(i).copied().unwrap_or(false)
    }
}

/// Trait for window functions
pub trait WindowFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Compute one output per row of an ordered partition
    ///
    /// The result has exactly `partition.len()` values, in window order.
    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>>;

    /// Clone the function into a new instance
    fn clone_box(&self) -> Box<dyn WindowFunction>;
}

// Re-export main types
pub use registry::{global_registry, FunctionRegistry};
pub use window::{
    CumeDistFunction, DenseRankFunction, LagFunction, LeadFunction, NtileFunction,
    PercentRankFunction, RankFunction, RankState, RowNumberFunction,
};
