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

//! Window Function Tests
//!
//! Tests ranking functions: ROW_NUMBER, RANK, DENSE_RANK, PERCENT_RANK,
//! CUME_DIST, NTILE

use windowkit::{
    row, DataType, Error, ExecutorConfig, OrderByColumn, SchemaBuilder, Table, Value,
    WindowExecutor, WindowQuery, WindowSpec,
};

fn setup_window_table() -> Table {
    let schema = SchemaBuilder::new()
        .add("id", DataType::Integer)
        .add("name", DataType::Text)
        .add("department", DataType::Text)
        .add("salary", DataType::Integer)
        .build()
        .expect("Failed to build schema");

    Table::new(
        schema,
        vec![
            row![1, "Alice", "Engineering", 85000],
            row![2, "Bob", "Engineering", 75000],
            row![3, "Charlie", "Engineering", 90000],
            row![4, "Diana", "Marketing", 65000],
            row![5, "Eve", "Marketing", 70000],
            row![6, "Frank", "Finance", 95000],
            row![7, "Grace", "Finance", 85000],
        ],
    )
    .expect("Failed to create table")
}

/// The (A,1,10),(A,2,20),(A,2,15),(B,1,5) table
fn setup_group_table() -> Table {
    let schema = SchemaBuilder::new()
        .add("grp", DataType::Text)
        .add("k", DataType::Integer)
        .add("value", DataType::Integer)
        .build()
        .expect("Failed to build schema");

    Table::new(
        schema,
        vec![
            row!["A", 1, 10],
            row!["A", 2, 20],
            row!["A", 2, 15],
            row!["B", 1, 5],
        ],
    )
    .expect("Failed to create table")
}

fn ints(table: &Table, column: &str) -> Vec<i64> {
    table
        .column_values(column)
        .expect("Failed to read column")
        .iter()
        .map(|v| v.as_int64().expect("Expected integer"))
        .collect()
}

fn floats(table: &Table, column: &str) -> Vec<f64> {
    table
        .column_values(column)
        .expect("Failed to read column")
        .iter()
        .map(|v| v.as_float64().expect("Expected float"))
        .collect()
}

/// Test ROW_NUMBER() without PARTITION BY or ORDER BY
#[test]
fn test_row_number_function() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql("ROW_NUMBER() OVER () AS row_num")
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert_eq!(ints(&result, "row_num"), vec![1, 2, 3, 4, 5, 6, 7]);
}

/// Test RANK() ordered by salary descending
#[test]
fn test_rank_function() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql("RANK() OVER (ORDER BY salary DESC) AS rnk")
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    // 95000, 90000, 85000 x2, 75000, 70000, 65000
    assert_eq!(ints(&result, "rnk"), vec![3, 5, 2, 7, 6, 1, 3]);
}

/// Test DENSE_RANK() ordered by salary descending
#[test]
fn test_dense_rank_function() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql("DENSE_RANK() OVER (ORDER BY salary DESC) AS drnk")
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert_eq!(ints(&result, "drnk"), vec![3, 4, 2, 6, 5, 1, 3]);
}

/// Test ROW_NUMBER() with PARTITION BY department
#[test]
fn test_row_number_partitioned() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql(
            "ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS dept_rank",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    // Engineering: Charlie, Alice, Bob; Marketing: Eve, Diana; Finance: Frank, Grace
    assert_eq!(ints(&result, "dept_rank"), vec![2, 3, 1, 2, 1, 1, 2]);
}

/// Grouped scenario: RANK, DENSE_RANK and ROW_NUMBER side by side
#[test]
fn test_ranking_scenario() {
    let table = setup_group_table();
    let result = WindowQuery::new(&table)
        .window_sql(
            "RANK() OVER (PARTITION BY grp ORDER BY k) AS r, \
             DENSE_RANK() OVER (PARTITION BY grp ORDER BY k) AS dr, \
             ROW_NUMBER() OVER (PARTITION BY grp ORDER BY k) AS rn",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert_eq!(ints(&result, "r"), vec![1, 2, 2, 1]);
    assert_eq!(ints(&result, "dr"), vec![1, 2, 2, 1]);
    assert_eq!(ints(&result, "rn"), vec![1, 2, 3, 1]);
}

/// Output keeps the input rows untouched and in order
#[test]
fn test_output_preserves_input_order() {
    let table = setup_window_table();
    let spec = WindowSpec::rank()
        .partition_by("department")
        .order_by(OrderByColumn::asc("salary"));
    let result = WindowExecutor::default()
        .execute(&table, &[spec])
        .expect("Failed to execute");

    assert_eq!(result.len(), table.len());
    assert_eq!(result.schema().column_names().last(), Some(&"rank"));
    for (input, output) in table.rows().iter().zip(result.rows()) {
        assert_eq!(&output.as_slice()[..input.len()], input.as_slice());
    }
}

/// PERCENT_RANK and CUME_DIST over the salary ladder
#[test]
fn test_percent_rank_and_cume_dist() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql(
            "PERCENT_RANK() OVER (ORDER BY salary) AS pr, \
             CUME_DIST() OVER (ORDER BY salary) AS cd",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    // Ascending: 65000, 70000, 75000, 85000 x2, 90000, 95000
    let pr = floats(&result, "pr");
    let expected_pr = [3.0 / 6.0, 2.0 / 6.0, 5.0 / 6.0, 0.0, 1.0 / 6.0, 1.0, 3.0 / 6.0];
    for (got, want) in pr.iter().zip(expected_pr) {
        assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
    }

    let cd = floats(&result, "cd");
    let expected_cd = [5.0 / 7.0, 3.0 / 7.0, 6.0 / 7.0, 1.0 / 7.0, 2.0 / 7.0, 1.0, 5.0 / 7.0];
    for (got, want) in cd.iter().zip(expected_cd) {
        assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
    }
}

/// NTILE splits 7 rows as 3, 2, 2
#[test]
fn test_ntile_function() {
    let table = setup_window_table();
    let result = WindowQuery::new(&table)
        .window_sql("NTILE(3) OVER (ORDER BY id) AS bucket")
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert_eq!(ints(&result, "bucket"), vec![1, 1, 1, 2, 2, 3, 3]);
}

/// NULLs sort last ascending unless NULLS FIRST is given
#[test]
fn test_nulls_ordering() {
    let schema = SchemaBuilder::new()
        .add("v", DataType::Integer)
        .build()
        .expect("Failed to build schema");
    let table = Table::new(
        schema,
        vec![
            row![2],
            windowkit::Row::from_values(vec![Value::null(DataType::Integer)]),
            row![1],
        ],
    )
    .expect("Failed to create table");

    let result = WindowQuery::new(&table)
        .window_sql(
            "ROW_NUMBER() OVER (ORDER BY v) AS a, \
             ROW_NUMBER() OVER (ORDER BY v NULLS FIRST) AS b, \
             ROW_NUMBER() OVER (ORDER BY v DESC) AS c",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert_eq!(ints(&result, "a"), vec![2, 3, 1]);
    assert_eq!(ints(&result, "b"), vec![3, 1, 2]);
    assert_eq!(ints(&result, "c"), vec![2, 1, 3]);
}

/// Integer and float keys near i64::MAX stay distinct
#[test]
fn test_mixed_numeric_keys_near_i64_max() {
    let schema = SchemaBuilder::new()
        .add("v", DataType::Integer)
        .build()
        .expect("Failed to build schema");
    let table = Table::new(
        schema,
        vec![
            row![i64::MAX - 1],
            windowkit::Row::from_values(vec![Value::Float(i64::MAX as f64)]),
            row![i64::MAX],
        ],
    )
    .expect("Failed to create table");

    let result = WindowQuery::new(&table)
        .window_sql(
            "DENSE_RANK() OVER (ORDER BY v) AS dr, \
             ROW_NUMBER() OVER (PARTITION BY v) AS rn",
        )
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    // The float is 2^63, above every i64
    assert_eq!(ints(&result, "dr"), vec![1, 3, 2]);
    assert_eq!(ints(&result, "rn"), vec![1, 1, 1]);
}

fn configuration_error(table: &Table, spec: WindowSpec) -> Error {
    let err = WindowExecutor::new(ExecutorConfig::sequential())
        .execute(table, &[WindowSpec::row_number().alias("ok"), spec])
        .expect_err("Expected configuration error");
    assert!(err.is_configuration_error(), "{:?}", err);
    err
}

/// Configuration errors surface before any output is produced
#[test]
fn test_configuration_errors() {
    let table = setup_group_table();

    assert_eq!(
        configuration_error(&table, WindowSpec::rank()),
        Error::EmptyOrderingKey("RANK".to_string())
    );
    assert_eq!(
        configuration_error(&table, WindowSpec::dense_rank().partition_by("grp")),
        Error::EmptyOrderingKey("DENSE_RANK".to_string())
    );
    assert_eq!(
        configuration_error(&table, WindowSpec::row_number().partition_by("missing")),
        Error::ColumnNotFound("missing".to_string())
    );
    assert_eq!(
        configuration_error(
            &table,
            WindowSpec::row_number().order_by(OrderByColumn::asc("nope"))
        ),
        Error::ColumnNotFound("nope".to_string())
    );
    assert_eq!(
        configuration_error(&table, WindowSpec::lag("absent", 1, 0)),
        Error::ColumnNotFound("absent".to_string())
    );
    assert!(matches!(
        configuration_error(&table, WindowSpec::ntile(0)),
        Error::InvalidArgument(_)
    ));
    assert_eq!(
        configuration_error(&table, WindowSpec::row_number().alias("grp")),
        Error::DuplicateColumn("grp".to_string())
    );
}

/// Two unaliased calls of the same function collide on their output name
#[test]
fn test_duplicate_output_names() {
    let table = setup_group_table();
    let err = WindowQuery::new(&table)
        .window_sql("ROW_NUMBER() OVER (), ROW_NUMBER() OVER (ORDER BY k)")
        .expect("Failed to parse")
        .execute()
        .expect_err("Expected duplicate column");
    assert_eq!(err, Error::DuplicateColumn("row_number".to_string()));
}

/// An empty table yields an empty result with the window columns appended
#[test]
fn test_empty_table() {
    let table = Table::empty(setup_group_table().schema().clone());
    let result = WindowQuery::new(&table)
        .window_sql("RANK() OVER (PARTITION BY grp ORDER BY k) AS r")
        .expect("Failed to parse")
        .execute()
        .expect("Failed to execute");

    assert!(result.is_empty());
    assert_eq!(
        result.schema().column_names(),
        vec!["grp", "k", "value", "r"]
    );
}
