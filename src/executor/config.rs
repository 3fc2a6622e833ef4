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

//! Executor configuration
//!
//! Partitions are independent, so a window function can be computed on the
//! rayon pool one partition per task. Parallelization has overhead, so it is
//! only used when there are enough partitions and enough rows.

// Default thresholds for parallel partition evaluation
pub const DEFAULT_PARALLEL_MIN_PARTITIONS: usize = 10;
pub const DEFAULT_PARALLEL_MIN_ROWS: usize = 1_000;

/// Configuration for the window executor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Whether partitions may be evaluated in parallel
    pub parallel: bool,
    /// Minimum number of partitions to trigger parallel evaluation
    pub parallel_min_partitions: usize,
    /// Minimum number of input rows to trigger parallel evaluation
    pub parallel_min_rows: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_partitions: DEFAULT_PARALLEL_MIN_PARTITIONS,
            parallel_min_rows: DEFAULT_PARALLEL_MIN_ROWS,
        }
    }
}

impl ExecutorConfig {
    /// Configuration that never uses the thread pool
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Builder method to enable or disable parallel evaluation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builder method to set the partition-count threshold
    pub fn with_parallel_min_partitions(mut self, partitions: usize) -> Self {
        self.parallel_min_partitions = partitions;
        self
    }

    /// Builder method to set the row-count threshold
    pub fn with_parallel_min_rows(mut self, rows: usize) -> Self {
        self.parallel_min_rows = rows;
        self
    }

    /// Check if a call over `partitions` partitions and `rows` rows should run in parallel
    #[inline]
    pub fn should_parallelize(&self, partitions: usize, rows: usize) -> bool {
        self.parallel
            && partitions >= self.parallel_min_partitions
            && rows >= self.parallel_min_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_min_partitions, 10);
        assert_eq!(config.parallel_min_rows, 1000);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ExecutorConfig::default();
        assert!(!config.should_parallelize(9, 10_000));
        assert!(!config.should_parallelize(100, 999));
        assert!(config.should_parallelize(10, 1000));

        let config = ExecutorConfig::sequential();
        assert!(!config.should_parallelize(1_000, 1_000_000));
    }

    #[test]
    fn test_builder() {
        let config = ExecutorConfig::default()
            .with_parallel_min_partitions(2)
            .with_parallel_min_rows(4);
        assert!(config.should_parallelize(2, 4));
        assert!(!config.with_parallel(false).should_parallelize(2, 4));
    }
}
