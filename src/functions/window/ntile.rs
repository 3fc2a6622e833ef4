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

//! NTILE window function

use crate::core::{Error, Result, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowFunction, WindowPartition,
};

/// NTILE window function
///
/// Divides the partition into n roughly equal groups and returns the group number
/// (1 to n) that each row belongs to.
///
/// If the partition doesn't divide evenly, the first groups get one extra row.
#[derive(Debug, Clone, Copy)]
pub struct NtileFunction {
    num_buckets: i64,
}

impl NtileFunction {
    /// Create a new NTILE function with the specified number of buckets
    pub fn new(num_buckets: i64) -> Result<Self> {
        if num_buckets <= 0 {
            return Err(Error::invalid_argument(format!(
                "NTILE bucket count must be positive, got {}",
                num_buckets
            )));
        }
        Ok(Self { num_buckets })
    }

    pub fn num_buckets(&self) -> i64 {
        self.num_buckets
    }

    /// Bucket (1-based) of the row at 0-based `position` in a partition of `total` rows
    fn bucket_of(&self, position: usize, total: usize) -> i64 {
        let n = self.num_buckets as u64;
        let total = total as u64;
        let row = position as u64;

        if n >= total {
            // More buckets than rows: each row gets its own bucket
            return (row + 1) as i64;
        }

        // NTILE(3) over 7 rows: base_size = 2, remainder = 1
        //   bucket 1: rows 0..3, bucket 2: rows 3..5, bucket 3: rows 5..7
        let base_size = total / n;
        let remainder = total % n;
        let large_rows = remainder * (base_size + 1);

        let bucket = if row < large_rows {
            row / (base_size + 1) + 1
        } else {
            remainder + (row - large_rows) / base_size + 1
        };
        bucket as i64
    }
}

impl Default for NtileFunction {
    fn default() -> Self {
        Self { num_buckets: 1 }
    }
}

impl WindowFunction for NtileFunction {
    fn name(&self) -> &str {
        "NTILE"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "NTILE",
            "Divides the partition into n buckets and returns the bucket number",
            FunctionSignature::new(
                FunctionDataType::Integer,
                vec![FunctionDataType::Integer],
                1,
                1,
            ),
        )
    }

    fn evaluate(&self, partition: &WindowPartition<'_>) -> Result<Vec<Value>> {
        let total = partition.len();
        Ok((0..total)
            .map(|i| Value::Integer(self.bucket_of(i, total)))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn WindowFunction> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(n: i64, rows: usize) -> Vec<i64> {
        let f = NtileFunction::new(n).unwrap();
        let partition = WindowPartition::new(rows, &[], &[]);
        f.evaluate(&partition)
            .unwrap()
            .iter()
            .map(|v| v.as_int64().unwrap())
            .collect()
    }

    #[test]
    fn test_ntile_even_distribution() {
        // 6 rows into 3 buckets = 2 rows per bucket
        assert_eq!(buckets(3, 6), vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_ntile_uneven_distribution() {
        // 7 rows into 3 buckets: the first bucket takes the extra row
        assert_eq!(buckets(3, 7), vec![1, 1, 1, 2, 2, 3, 3]);
        // 10 rows into 4 buckets: 3, 3, 2, 2
        assert_eq!(buckets(4, 10), vec![1, 1, 1, 2, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn test_ntile_more_buckets_than_rows() {
        assert_eq!(buckets(5, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_ntile_single_bucket() {
        assert_eq!(buckets(1, 4), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_ntile_empty_partition() {
        assert!(buckets(2, 0).is_empty());
    }

    #[test]
    fn test_ntile_rejects_non_positive() {
        assert!(matches!(NtileFunction::new(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(NtileFunction::new(-3), Err(Error::InvalidArgument(_))));
    }
}
