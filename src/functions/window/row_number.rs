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

//! ROW_NUMBER window function

use crate::core::{Result, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowFunction, WindowPartition,
};

/// ROW_NUMBER window function
///
/// Returns the sequential row number within the current partition, starting at 1.
/// Unlike RANK(), ROW_NUMBER() assigns consecutive numbers even for equal values.
#[derive(Default)]
pub struct RowNumberFunction;

impl WindowFunction for RowNumberFunction {
    fn name(&self) -> &str {
        "ROW_NUMBER"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "ROW_NUMBER",
            "Returns the sequential row number within the current partition",
            FunctionSignature::new(FunctionDataType::Integer, vec![], 0, 0),
        )
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        Ok((1..=partition.len() as i64).map(Value::Integer).collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(RowNumberFunction)
    }
}
