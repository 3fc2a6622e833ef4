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

//! Order resolver: sorts a partition by its ORDER BY keys
//!
//! The sort is stable. Rows that tie on every key keep their input order,
//! which other database systems do not promise. Add a tiebreak column to
//! the ORDER BY when the order of peers matters.

use std::cmp::Ordering;

use crate::core::{NullOrdering, Result, Row, Schema, SortDirection};

use super::spec::OrderByColumn;

/// One ORDER BY key with its column already resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortKey {
    index: usize,
    direction: SortDirection,
    nulls: NullOrdering,
}

/// Compiled ORDER BY clause
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderResolver {
    keys: Vec<SortKey>,
}

impl OrderResolver {
    /// Resolve every ORDER BY column against `schema`
    pub fn new(schema: &Schema, order_by: &[OrderByColumn]) -> Result<Self> {
        let keys = order_by
            .iter()
            .map(|col| {
                Ok(SortKey {
                    index: schema.resolve(&col.column)?,
                    direction: col.direction,
                    nulls: col.null_ordering(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    /// True when there is no ORDER BY
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of ordering keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Compare two rows key by key
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        for key in &self.keys {
            let (Some(a_val), Some(b_val)) = (a.get(key.index), b.get(key.index)) else {
                continue;
            };
            let cmp = a_val.sort_cmp(b_val, key.direction, key.nulls);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }

    /// Stable-sort `indices` (positions into `rows`) by the ordering keys
    pub fn sort(&self, rows: &[Row], indices: &mut [usize]) {
        if self.keys.is_empty() {
            return;
        }
        indices.sort_by(|&a, &b| self.compare(&rows[a], &rows[b]));
    }

    /// True when two rows are equal on every ordering key
    ///
    /// Without ORDER BY no two rows are peers.
    pub fn peers(&self, a: &Row, b: &Row) -> bool {
        !self.keys.is_empty() && self.compare(a, b) == Ordering::Equal
    }

    /// Peer flags for a sorted partition: `flags[i]` is true when row
    /// `sorted[i]` ties with `sorted[i - 1]`
    ///
    /// Returns an empty vector when there is no ORDER BY.
    pub fn tie_flags(&self, rows: &[Row], sorted: &[usize]) -> Vec<bool> {
        if self.keys.is_empty() {
            return Vec::new();
        }
        let mut flags = Vec::with_capacity(sorted.len());
        for (pos, &idx) in sorted.iter().enumerate() {
            let tie = pos > 0 && self.peers(&rows[sorted[pos - 1]], &rows[idx]);
            flags.push(tie);
        }
        flags
    }
}
