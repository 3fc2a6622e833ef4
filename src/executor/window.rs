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

//! Window function evaluation
//!
//! One call runs every spec through the same pipeline:
//!
//! ```text
//! validate all specs        (configuration errors abort here)
//!   ↓
//! partition_rows            (group row indices by PARTITION BY key)
//!   ↓
//! OrderResolver::sort       (stable sort inside each partition)
//!   ↓
//! WindowFunction::evaluate  (one value per row, in window order)
//!   ↓
//! scatter                   (back to original row positions)
//! ```

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::core::{Error, Result, Row, SchemaColumn, Table, Value};
use crate::functions::{WindowFunction, WindowPartition};

use super::config::ExecutorConfig;
use super::ordering::OrderResolver;
use super::partition::partition_rows;
use super::spec::WindowSpec;

/// Everything a partition task needs, resolved once per spec
struct PreparedWindow<'a> {
    spec: &'a WindowSpec,
    function: Box<dyn WindowFunction>,
    resolver: OrderResolver,
    argument_index: Option<usize>,
}

/// Evaluates window specifications over in-memory tables
#[derive(Debug, Clone, Default)]
pub struct WindowExecutor {
    config: ExecutorConfig,
}

impl WindowExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Evaluate `specs` over `table`
    ///
    /// Returns a new table with the input columns followed by one column per
    /// spec, rows in input order. Every spec is validated (including output
    /// column names) before any row is processed, so a configuration error
    /// yields no output at all.
    pub fn execute(&self, table: &Table, specs: &[WindowSpec]) -> Result<Table> {
        debug!(
            "Executing {} window functions over {} rows",
            specs.len(),
            table.len()
        );

        // Dry run over the output schema catches name collisions up front
        let mut output_schema = table.schema().clone();
        for spec in specs {
            spec.validate(table.schema())?;
            output_schema.add_column(SchemaColumn::new(
                spec.output_name(),
                spec.output_type(table.schema())?,
            ))?;
        }

        let mut columns = Vec::with_capacity(specs.len());
        for spec in specs {
            columns.push(self.compute(table, spec)?);
        }

        let (_, rows) = table.clone().into_parts();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut values = row.into_values();
                values.extend(columns.iter().map(|col| col[i].clone()));
                Row::from_values(values)
            })
            .collect();

        Table::new(output_schema, rows)
    }

    /// Evaluate a single spec and return its column, aligned with the input rows
    pub fn evaluate(&self, table: &Table, spec: &WindowSpec) -> Result<Vec<Value>> {
        spec.validate(table.schema())?;
        self.compute(table, spec)
    }

    /// Compute one window column; `spec` has already been validated
    fn compute(&self, table: &Table, spec: &WindowSpec) -> Result<Vec<Value>> {
        let schema = table.schema();
        let prepared = PreparedWindow {
            spec,
            function: spec.prepare(schema)?,
            resolver: OrderResolver::new(schema, &spec.order_by)?,
            argument_index: spec
                .function
                .argument_column()
                .map(|column| schema.resolve(column))
                .transpose()?,
        };

        let partitions = partition_rows(table, &spec.partition_by)?;
        let rows = table.rows();
        let use_parallel = self.config.should_parallelize(partitions.len(), rows.len());

        debug!(
            function = prepared.function.name(),
            partitions = partitions.len(),
            rows = rows.len(),
            parallel = use_parallel,
            "Computing window function"
        );

        let partition_results: Vec<Vec<(usize, Value)>> = if use_parallel {
            partitions
                .groups()
                .par_iter()
                .map(|row_indices| Self::compute_partition(&prepared, rows, row_indices))
                .collect::<Result<_>>()?
        } else {
            partitions
                .groups()
                .iter()
                .map(|row_indices| Self::compute_partition(&prepared, rows, row_indices))
                .collect::<Result<_>>()?
        };

        // Map results from window order back to original row indices
        let mut results = vec![Value::null_unknown(); rows.len()];
        for (orig_idx, value) in partition_results.into_iter().flatten() {
            results[orig_idx] = value;
        }
        Ok(results)
    }

    /// Sort one partition, evaluate the function, and pair each result with
    /// its original row index
    fn compute_partition(
        prepared: &PreparedWindow<'_>,
        rows: &[Row],
        row_indices: &[usize],
    ) -> Result<Vec<(usize, Value)>> {
        let mut sorted = row_indices.to_vec();
        prepared.resolver.sort(rows, &mut sorted);

        let ties = prepared.resolver.tie_flags(rows, &sorted);
        let values: Vec<Value> = match prepared.argument_index {
            Some(idx) => sorted
                .iter()
                .map(|&r| rows[r].get(idx).cloned().unwrap_or_else(Value::null_unknown))
                .collect(),
            None => Vec::new(),
        };

        let partition = WindowPartition::new(sorted.len(), &values, &ties);
        let results = prepared.function.evaluate(&partition)?;
        if results.len() != sorted.len() {
            return Err(Error::invalid_argument(format!(
                "{} returned {} values for a partition of {} rows",
                prepared.function.name(),
                results.len(),
                sorted.len()
            )));
        }

        trace!(
            "Partition of {} rows evaluated for {}",
            sorted.len(),
            prepared.spec.output_name()
        );
        Ok(sorted.into_iter().zip(results).collect())
    }
}
