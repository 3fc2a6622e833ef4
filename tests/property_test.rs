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

//! Property tests for ranking and offset functions
//!
//! Each generated table has a small group column (many ties, several
//! partitions) and a key column drawn from a narrow range so tie groups
//! are common.

use proptest::prelude::*;
use windowkit::{
    row, DataType, ExecutorConfig, OrderByColumn, SchemaBuilder, Table, Value, WindowExecutor,
    WindowSpec,
};

fn build_table(rows: &[(u8, i64, i64)]) -> Table {
    let schema = SchemaBuilder::new()
        .add("grp", DataType::Integer)
        .add("k", DataType::Integer)
        .add("value", DataType::Integer)
        .build()
        .expect("Failed to build schema");
    Table::new(
        schema,
        rows.iter()
            .map(|(g, k, v)| row![i64::from(*g), *k, *v])
            .collect(),
    )
    .expect("Failed to create table")
}

fn table_strategy() -> impl Strategy<Value = Vec<(u8, i64, i64)>> {
    prop::collection::vec((0u8..4, 0i64..6, -1000i64..1000), 0..60)
}

fn ordered(spec: WindowSpec) -> WindowSpec {
    spec.partition_by("grp").order_by(OrderByColumn::asc("k"))
}

fn evaluate(table: &Table, spec: &WindowSpec) -> Vec<Value> {
    WindowExecutor::new(ExecutorConfig::sequential())
        .evaluate(table, spec)
        .expect("Failed to evaluate")
}

fn as_ints(values: &[Value]) -> Vec<i64> {
    values
        .iter()
        .map(|v| v.as_int64().expect("Expected integer"))
        .collect()
}

/// Row indices of each partition in (k, input position) order
fn sorted_partitions(rows: &[(u8, i64, i64)]) -> Vec<Vec<usize>> {
    let mut groups: Vec<(u8, Vec<usize>)> = Vec::new();
    for (i, (g, _, _)) in rows.iter().enumerate() {
        match groups.iter_mut().find(|(key, _)| key == g) {
            Some((_, members)) => members.push(i),
            None => groups.push((*g, vec![i])),
        }
    }
    groups
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by_key(|&i| rows[i].1);
            members
        })
        .collect()
}

proptest! {
    #[test]
    fn row_number_is_one_to_n(rows in table_strategy()) {
        let table = build_table(&rows);
        let numbers = as_ints(&evaluate(&table, &ordered(WindowSpec::row_number())));
        for members in sorted_partitions(&rows) {
            let got: Vec<i64> = members.iter().map(|&i| numbers[i]).collect();
            let want: Vec<i64> = (1..=members.len() as i64).collect();
            prop_assert_eq!(got, want);
        }
    }

    #[test]
    fn rank_jumps_by_tie_group_size(rows in table_strategy()) {
        let table = build_table(&rows);
        let ranks = as_ints(&evaluate(&table, &ordered(WindowSpec::rank())));
        for members in sorted_partitions(&rows) {
            for pair in members.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if rows[a].1 == rows[b].1 {
                    prop_assert_eq!(ranks[a], ranks[b]);
                } else {
                    // Rank of b = 1 + number of rows sorted before it
                    let position = members.iter().position(|&i| i == b).unwrap_or(0);
                    prop_assert!(ranks[b] > ranks[a]);
                    prop_assert_eq!(ranks[b], position as i64 + 1);
                }
            }
            if let Some(&first) = members.first() {
                prop_assert_eq!(ranks[first], 1);
            }
        }
    }

    #[test]
    fn dense_rank_steps_by_one(rows in table_strategy()) {
        let table = build_table(&rows);
        let ranks = as_ints(&evaluate(&table, &ordered(WindowSpec::dense_rank())));
        for members in sorted_partitions(&rows) {
            for pair in members.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let step = if rows[a].1 == rows[b].1 { 0 } else { 1 };
                prop_assert_eq!(ranks[b] - ranks[a], step);
            }
            if let Some(&first) = members.first() {
                prop_assert_eq!(ranks[first], 1);
            }
        }
    }

    #[test]
    fn lag_reads_k_rows_back(rows in table_strategy(), k in -8i64..8) {
        let table = build_table(&rows);
        let lagged = evaluate(&table, &ordered(WindowSpec::lag("value", k, -1)));
        for members in sorted_partitions(&rows) {
            for (pos, &i) in members.iter().enumerate() {
                let source = pos as i64 - k;
                let want = if source >= 0 && (source as usize) < members.len() {
                    rows[members[source as usize]].2
                } else {
                    -1
                };
                prop_assert_eq!(&lagged[i], &Value::Integer(want));
            }
        }
    }

    #[test]
    fn lead_is_lag_negated(rows in table_strategy(), k in -8i64..8) {
        let table = build_table(&rows);
        let lead = evaluate(&table, &ordered(WindowSpec::lead("value", k, 0)));
        let lag = evaluate(&table, &ordered(WindowSpec::lag("value", -k, 0)));
        prop_assert_eq!(lead, lag);
    }

    #[test]
    fn parallel_matches_sequential(rows in table_strategy()) {
        let table = build_table(&rows);
        let specs = vec![
            ordered(WindowSpec::rank()).alias("r"),
            ordered(WindowSpec::ntile(3)).alias("n"),
            ordered(WindowSpec::lead("value", 2, 0)).alias("l"),
        ];
        let eager = ExecutorConfig::default()
            .with_parallel_min_partitions(1)
            .with_parallel_min_rows(0);
        let parallel = WindowExecutor::new(eager)
            .execute(&table, &specs)
            .expect("Failed to execute");
        let sequential = WindowExecutor::new(ExecutorConfig::sequential())
            .execute(&table, &specs)
            .expect("Failed to execute");
        prop_assert_eq!(parallel, sequential);
    }
}
