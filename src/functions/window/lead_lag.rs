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

//! LEAD and LAG window functions

use crate::core::{Error, Result, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowFunction, WindowPartition,
};

/// Value `delta` rows away from window position `current`, or `default`
/// when that position falls outside the partition.
///
/// Positive `delta` looks forward (LEAD), negative looks back (LAG).
pub fn shifted_value(
    partition: &WindowPartition<'_>,
    current: usize,
    delta: i64,
    default: &Value,
) -> Value {
    let target = current as i128 + delta as i128;
    if target < 0 || target >= partition.len() as i128 {
        return default.clone();
    }
    partition.value(target as usize)
}

fn check_offset(function: &str, offset: i64) -> Result<()> {
    if offset == i64::MIN {
        return Err(Error::invalid_offset(format!(
            "{} offset {} cannot be negated",
            function, offset
        )));
    }
    Ok(())
}

fn offset_signature() -> FunctionSignature {
    FunctionSignature::new(
        FunctionDataType::Column,
        vec![
            FunctionDataType::Column,  // column
            FunctionDataType::Integer, // offset
            FunctionDataType::Any,     // default
        ],
        1,
        3,
    )
}

/// LEAD window function
///
/// Returns the value from a row that is `offset` rows after the current row
/// within the partition. If there is no such row, returns the default value.
/// A negative offset reads backwards, so `LEAD(x, -k)` is `LAG(x, k)`.
#[derive(Debug, Clone)]
pub struct LeadFunction {
    offset: i64,
    default_value: Value,
}

impl LeadFunction {
    /// Create a new LEAD function with the specified offset and default value
    pub fn new(offset: i64, default_value: Value) -> Result<Self> {
        check_offset("LEAD", offset)?;
        Ok(Self {
            offset,
            default_value,
        })
    }

    /// Create a new LEAD function with a NULL default
    pub fn with_offset(offset: i64) -> Result<Self> {
        Self::new(offset, Value::null_unknown())
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for LeadFunction {
    fn default() -> Self {
        Self {
            offset: 1,
            default_value: Value::null_unknown(),
        }
    }
}

impl WindowFunction for LeadFunction {
    fn name(&self) -> &str {
        "LEAD"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "LEAD",
            "Returns the value from a row that is offset rows after the current row",
            offset_signature(),
        )
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        Ok((0..partition.len())
            .map(|i| shifted_value(partition, i, self.offset, &self.default_value))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(self.clone())
    }
}

/// LAG window function
///
/// Returns the value from a row that is `offset` rows before the current row
/// within the partition. If there is no such row, returns the default value.
#[derive(Debug, Clone)]
pub struct LagFunction {
    offset: i64,
    default_value: Value,
}

impl LagFunction {
    /// Create a new LAG function with the specified offset and default value
    pub fn new(offset: i64, default_value: Value) -> Result<Self> {
        check_offset("LAG", offset)?;
        Ok(Self {
            offset,
            default_value,
        })
    }

    /// Create a new LAG function with a NULL default
    pub fn with_offset(offset: i64) -> Result<Self> {
        Self::new(offset, Value::null_unknown())
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for LagFunction {
    fn default() -> Self {
        Self {
            offset: 1,
            default_value: Value::null_unknown(),
        }
    }
}

impl WindowFunction for LagFunction {
    fn name(&self) -> &str {
        "LAG"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "LAG",
            "Returns the value from a row that is offset rows before the current row",
            offset_signature(),
        )
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        // offset is never i64::MIN, so the negation cannot overflow
        let delta = -self.offset;
        Ok((0..partition.len())
            .map(|i| shifted_value(partition, i, delta, &self.default_value))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(self.clone())
    }
}
