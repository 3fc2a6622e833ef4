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

//! RANK, DENSE_RANK, PERCENT_RANK and CUME_DIST window functions

use crate::core::{Result, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowFunction, WindowPartition,
};

/// Running ranking state over one ordered partition
///
/// The comparison with the last-seen ordering key is done by the caller
/// and arrives as the `tie` flag of [`advance`](RankState::advance).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankState {
    rows_seen: i64,
    rank: i64,
    dense_rank: i64,
}

impl RankState {
    /// State before the first row of a partition
    pub fn new() -> Self {
        Self::default()
    }

    /// Step to the next row. `tie` is true when the row's ordering key
    /// equals the previous row's; it is ignored for the first row.
    pub fn advance(&mut self, tie: bool) {
        if self.rows_seen == 0 || !tie {
            self.rank = self.rows_seen + 1;
            self.dense_rank += 1;
        }
        self.rows_seen += 1;
    }

    /// ROW_NUMBER of the current row
    pub fn row_number(&self) -> i64 {
        self.rows_seen
    }

    /// RANK of the current row (gaps after ties)
    pub fn rank(&self) -> i64 {
        self.rank
    }

    /// DENSE_RANK of the current row (no gaps)
    pub fn dense_rank(&self) -> i64 {
        self.dense_rank
    }
}

/// Run the state machine over a partition and project one field per row
fn scan_ranks(partition: &WindowPartition<'_>, project: impl Fn(&RankState) -> i64) -> Vec<i64> {
    let mut state = RankState::new();
    (0..partition.len())
        .map(|i| {
            state.advance(partition.ties_previous(i));
            project(&state)
        })
        .collect()
}

/// RANK window function
///
/// Rows with equal ordering keys receive the same rank, and the next rank
/// is the row number (leaving gaps).
///
/// Example: If two rows tie for rank 1, the next row gets rank 3 (not 2).
#[derive(Default)]
pub struct RankFunction;

impl WindowFunction for RankFunction {
    fn name(&self) -> &str {
        "RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "RANK",
            "Returns the rank of the current row within the partition, with gaps for ties",
            FunctionSignature::new(FunctionDataType::Integer, vec![], 0, 0),
        )
        .ordered()
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        Ok(scan_ranks(partition, RankState::rank)
            .into_iter()
            .map(Value::Integer)
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(RankFunction)
    }
}

/// DENSE_RANK window function
///
/// Rows with equal ordering keys receive the same rank, and the next rank
/// is incremented by 1 (no gaps).
///
/// Example: If two rows tie for rank 1, the next row gets rank 2.
#[derive(Default)]
pub struct DenseRankFunction;

impl WindowFunction for DenseRankFunction {
    fn name(&self) -> &str {
        "DENSE_RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "DENSE_RANK",
            "Returns the rank of the current row within the partition, without gaps for ties",
            FunctionSignature::new(FunctionDataType::Integer, vec![], 0, 0),
        )
        .ordered()
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        Ok(scan_ranks(partition, RankState::dense_rank)
            .into_iter()
            .map(Value::Integer)
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(DenseRankFunction)
    }
}

/// PERCENT_RANK window function
///
/// Formula: (rank - 1) / (n - 1), where n is the number of rows in the partition.
/// A single-row partition yields 0.
#[derive(Default)]
pub struct PercentRankFunction;

impl WindowFunction for PercentRankFunction {
    fn name(&self) -> &str {
        "PERCENT_RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "PERCENT_RANK",
            "Returns the relative rank of the current row: (rank - 1) / (total_rows - 1)",
            FunctionSignature::new(FunctionDataType::Float, vec![], 0, 0),
        )
        .ordered()
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        let n = partition.len();
        if n <= 1 {
            return Ok(vec![Value::Float(0.0); n]);
        }
        let denominator = (n - 1) as f64;
        Ok(scan_ranks(partition, RankState::rank)
            .into_iter()
            .map(|rank| Value::Float((rank - 1) as f64 / denominator))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(PercentRankFunction)
    }
}

/// CUME_DIST window function
///
/// Formula: (rows up to and including the current row's last peer) / n.
/// The result is in (0, 1].
#[derive(Default)]
pub struct CumeDistFunction;

impl WindowFunction for CumeDistFunction {
    fn name(&self) -> &str {
        "CUME_DIST"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "CUME_DIST",
            "Returns the cumulative distribution of a value: (rows <= current) / total_rows",
            FunctionSignature::new(FunctionDataType::Float, vec![], 0, 0),
        )
        .ordered()
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        let n = partition.len();
        let mut results = Vec::with_capacity(n);
        let mut group_start = 0;

        while group_start < n {
            let mut group_end = group_start + 1;
            while group_end < n && partition.ties_previous(group_end) {
                group_end += 1;
            }
            let dist = group_end as f64 / n as f64;
            results.extend(std::iter::repeat(Value::Float(dist)).take(group_end - group_start));
            group_start = group_end;
        }

        Ok(results)
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(CumeDistFunction)
    }
}
