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

//! Partitioner: groups row indices by their PARTITION BY key

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Result, Table, Value};

/// Partition key tuple - most windows partition by at most a few columns
pub type PartitionKey = SmallVec<[Value; 4]>;

/// Row indices grouped by partition key
///
/// Partitions appear in order of first occurrence in the input, and the
/// indices inside a partition keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    keys: Vec<PartitionKey>,
    groups: Vec<Vec<usize>>,
}

impl Partitions {
    /// Number of partitions
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Row indices of every partition
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Partition keys, aligned with [`groups`](Partitions::groups)
    pub fn keys(&self) -> &[PartitionKey] {
        &self.keys
    }

    /// Iterate over (key, row indices)
    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKey, &[usize])> {
        self.keys
            .iter()
            .zip(self.groups.iter().map(Vec::as_slice))
    }

    /// Row indices of the partition with the given key
    pub fn get(&self, key: &[Value]) -> Option<&[usize]> {
        self.keys
            .iter()
            .position(|k| k.as_slice() == key)
            .map(|i| self.groups[i].as_slice())
    }

    /// Total number of rows across all partitions
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn into_groups(self) -> Vec<Vec<usize>> {
        self.groups
    }
}

/// Group the rows of `table` by the values of the `partition_by` columns
///
/// Every column is resolved before any row is touched, so an unknown
/// column fails with `ColumnNotFound` and nothing else. NULLs are equal to
/// each other here, so all rows with a NULL key share one partition.
pub fn partition_rows(table: &Table, partition_by: &[String]) -> Result<Partitions> {
    let schema = table.schema();
    let partition_indices = partition_by
        .iter()
        .map(|name| schema.resolve(name))
        .collect::<Result<Vec<usize>>>()?;

    let rows = table.rows();
    if rows.is_empty() {
        return Ok(Partitions::default());
    }

    // No PARTITION BY: the whole input is one partition
    if partition_indices.is_empty() {
        return Ok(Partitions {
            keys: vec![PartitionKey::new()],
            groups: vec![(0..rows.len()).collect()],
        });
    }

    let mut slots: FxHashMap<PartitionKey, usize> = FxHashMap::default();
    let mut partitions = Partitions::default();

    for (i, row) in rows.iter().enumerate() {
        let key: PartitionKey = partition_indices
            .iter()
            .map(|&idx| row.get(idx).cloned().unwrap_or_else(Value::null_unknown))
            .collect();

        match slots.get(&key) {
            Some(&slot) => partitions.groups[slot].push(i),
            None => {
                slots.insert(key.clone(), partitions.groups.len());
                partitions.keys.push(key);
                partitions.groups.push(vec![i]);
            }
        }
    }

    Ok(partitions)
}
