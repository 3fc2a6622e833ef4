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

//! Window specifications
//!
//! A [`WindowSpec`] is one `func(args) OVER (PARTITION BY ... ORDER BY ...)`
//! call. It is plain data; [`WindowSpec::validate`] runs every
//! configuration check against a schema before any row is processed.

use std::fmt;

use crate::core::{DataType, Error, NullOrdering, Result, Schema, SortDirection, Value};
use crate::functions::{
    CumeDistFunction, DenseRankFunction, LagFunction, LeadFunction, NtileFunction,
    PercentRankFunction, RankFunction, RowNumberFunction, WindowFunction,
};
use crate::parser::token::quote_identifier;

/// One ORDER BY item inside a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByColumn {
    pub column: String,
    pub direction: SortDirection,
    /// Explicit NULLS FIRST / NULLS LAST; `None` means the direction's default
    pub nulls: Option<NullOrdering>,
}

impl OrderByColumn {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
            nulls: None,
        }
    }

    /// Ascending order on `column`
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    /// Descending order on `column`
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }

    /// Effective NULL placement (NULLS LAST for ASC, NULLS FIRST for DESC)
    pub fn null_ordering(&self) -> NullOrdering {
        self.nulls
            .unwrap_or_else(|| NullOrdering::default_for(self.direction))
    }
}

impl fmt::Display for OrderByColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_identifier(&self.column), self.direction)?;
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls)?;
        }
        Ok(())
    }
}

/// The function part of a window call, with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum WindowFunctionKind {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    CumeDist,
    /// NTILE(buckets)
    Ntile(i64),
    /// LAG(column, offset, default)
    Lag {
        column: String,
        offset: i64,
        default: Value,
    },
    /// LEAD(column, offset, default)
    Lead {
        column: String,
        offset: i64,
        default: Value,
    },
}

impl WindowFunctionKind {
    /// Upper-case SQL name
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunctionKind::RowNumber => "ROW_NUMBER",
            WindowFunctionKind::Rank => "RANK",
            WindowFunctionKind::DenseRank => "DENSE_RANK",
            WindowFunctionKind::PercentRank => "PERCENT_RANK",
            WindowFunctionKind::CumeDist => "CUME_DIST",
            WindowFunctionKind::Ntile(_) => "NTILE",
            WindowFunctionKind::Lag { .. } => "LAG",
            WindowFunctionKind::Lead { .. } => "LEAD",
        }
    }

    /// Column whose values the function reads, if any
    pub fn argument_column(&self) -> Option<&str> {
        match self {
            WindowFunctionKind::Lag { column, .. } | WindowFunctionKind::Lead { column, .. } => {
                Some(column)
            }
            _ => None,
        }
    }

    /// Build the executable function
    ///
    /// Fails on a non-positive NTILE bucket count or an offset that cannot
    /// be negated.
    pub fn instantiate(&self) -> Result<Box<dyn WindowFunction>> {
        let function: Box<dyn WindowFunction> = match self {
            WindowFunctionKind::RowNumber => Box::new(RowNumberFunction),
            WindowFunctionKind::Rank => Box::new(RankFunction),
            WindowFunctionKind::DenseRank => Box::new(DenseRankFunction),
            WindowFunctionKind::PercentRank => Box::new(PercentRankFunction),
            WindowFunctionKind::CumeDist => Box::new(CumeDistFunction),
            WindowFunctionKind::Ntile(buckets) => Box::new(NtileFunction::new(*buckets)?),
            WindowFunctionKind::Lag {
                offset, default, ..
            } => Box::new(LagFunction::new(*offset, default.clone())?),
            WindowFunctionKind::Lead {
                offset, default, ..
            } => Box::new(LeadFunction::new(*offset, default.clone())?),
        };
        Ok(function)
    }
}

/// Render a value as a SQL literal
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null(_) => "NULL".to_string(),
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::Timestamp(_) => format!("TIMESTAMP '{}'", value),
        Value::Integer(_) | Value::Float(_) => value.to_string(),
    }
}

impl fmt::Display for WindowFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFunctionKind::Ntile(buckets) => write!(f, "NTILE({})", buckets),
            WindowFunctionKind::Lag {
                column,
                offset,
                default,
            }
            | WindowFunctionKind::Lead {
                column,
                offset,
                default,
            } => write!(
                f,
                "{}({}, {}, {})",
                self.name(),
                quote_identifier(column),
                offset,
                sql_literal(default)
            ),
            _ => write!(f, "{}()", self.name()),
        }
    }
}

/// A complete window function call
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub function: WindowFunctionKind,
    pub partition_by: Vec<String>,
    pub order_by: Vec<OrderByColumn>,
    /// Output column name; defaults to the lower-case function name
    pub alias: Option<String>,
}

impl WindowSpec {
    pub fn new(function: WindowFunctionKind) -> Self {
        Self {
            function,
            partition_by: Vec::new(),
            order_by: Vec::new(),
            alias: None,
        }
    }

    pub fn row_number() -> Self {
        Self::new(WindowFunctionKind::RowNumber)
    }

    pub fn rank() -> Self {
        Self::new(WindowFunctionKind::Rank)
    }

    pub fn dense_rank() -> Self {
        Self::new(WindowFunctionKind::DenseRank)
    }

    pub fn percent_rank() -> Self {
        Self::new(WindowFunctionKind::PercentRank)
    }

    pub fn cume_dist() -> Self {
        Self::new(WindowFunctionKind::CumeDist)
    }

    pub fn ntile(buckets: i64) -> Self {
        Self::new(WindowFunctionKind::Ntile(buckets))
    }

    /// LAG(column, offset, default)
    pub fn lag(column: impl Into<String>, offset: i64, default: impl Into<Value>) -> Self {
        Self::new(WindowFunctionKind::Lag {
            column: column.into(),
            offset,
            default: default.into(),
        })
    }

    /// LEAD(column, offset, default)
    pub fn lead(column: impl Into<String>, offset: i64, default: impl Into<Value>) -> Self {
        Self::new(WindowFunctionKind::Lead {
            column: column.into(),
            offset,
            default: default.into(),
        })
    }

    /// Add a PARTITION BY column
    pub fn partition_by(mut self, column: impl Into<String>) -> Self {
        self.partition_by.push(column.into());
        self
    }

    /// Add an ORDER BY item
    pub fn order_by(mut self, column: OrderByColumn) -> Self {
        self.order_by.push(column);
        self
    }

    /// Set the output column name
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Name of the output column
    pub fn output_name(&self) -> String {
        self.alias
            .clone()
            .unwrap_or_else(|| self.function.name().to_lowercase())
    }

    /// Type of the output column
    ///
    /// LAG/LEAD pass the argument column's type through; when that column is
    /// untyped the default value's type is used.
    pub fn output_type(&self, schema: &Schema) -> Result<DataType> {
        let column_type = self.argument_type(schema)?;
        let column_type = match (&self.function, column_type) {
            (
                WindowFunctionKind::Lag { default, .. } | WindowFunctionKind::Lead { default, .. },
                Some(DataType::Null) | None,
            ) => Some(default.data_type()),
            (_, t) => t,
        };
        let info = self.function.instantiate()?.info();
        Ok(info.signature.return_type.resolve(column_type))
    }

    /// Run every configuration check against `schema`
    ///
    /// Checks, in order: PARTITION BY columns, ORDER BY columns, the
    /// argument column, function arguments, and that ranking functions
    /// have an ORDER BY.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        for column in &self.partition_by {
            schema.resolve(column)?;
        }
        for item in &self.order_by {
            schema.resolve(&item.column)?;
        }

        let function = self.prepare(schema)?;
        if function.info().requires_order_by && self.order_by.is_empty() {
            return Err(Error::EmptyOrderingKey(self.function.name().to_string()));
        }
        Ok(())
    }

    /// Build the executable function for `schema`
    ///
    /// A LAG/LEAD default is converted to the argument column's type; a
    /// default that does not convert is `InvalidArgument`.
    pub fn prepare(&self, schema: &Schema) -> Result<Box<dyn WindowFunction>> {
        let column_type = self.argument_type(schema)?;
        let (offset, default, lead) = match &self.function {
            WindowFunctionKind::Lag {
                offset, default, ..
            } => (*offset, default, false),
            WindowFunctionKind::Lead {
                offset, default, ..
            } => (*offset, default, true),
            _ => return self.function.instantiate(),
        };

        let default = match column_type {
            Some(target) if target != DataType::Null && !default.is_null() => {
                let coerced = default.coerce_to_type(target);
                if coerced.is_null() {
                    return Err(Error::invalid_argument(format!(
                        "{} default {} does not fit column type {}",
                        self.function.name(),
                        sql_literal(default),
                        target
                    )));
                }
                coerced
            }
            _ => default.clone(),
        };

        if lead {
            Ok(Box::new(LeadFunction::new(offset, default)?))
        } else {
            Ok(Box::new(LagFunction::new(offset, default)?))
        }
    }

    fn argument_type(&self, schema: &Schema) -> Result<Option<DataType>> {
        match self.function.argument_column() {
            Some(column) => {
                let idx = schema.resolve(column)?;
                Ok(schema.get_column(idx).map(|c| c.data_type))
            }
            None => Ok(None),
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OVER (", self.function)?;
        if !self.partition_by.is_empty() {
            let columns: Vec<_> = self
                .partition_by
                .iter()
                .map(|c| quote_identifier(c))
                .collect();
            write!(f, "PARTITION BY {}", columns.join(", "))?;
            if !self.order_by.is_empty() {
                write!(f, " ")?;
            }
        }
        if !self.order_by.is_empty() {
            let items: Vec<String> = self.order_by.iter().map(|o| o.to_string()).collect();
            write!(f, "ORDER BY {}", items.join(", "))?;
        }
        write!(f, ")")?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", quote_identifier(alias))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaBuilder;

    fn schema() -> Schema {
        SchemaBuilder::new()
            .add("dept", DataType::Text)
            .add("name", DataType::Text)
            .add("salary", DataType::Float)
            .add("misc", DataType::Null)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder() {
        let spec = WindowSpec::rank()
            .partition_by("dept")
            .order_by(OrderByColumn::desc("salary"))
            .alias("r");
        assert_eq!(spec.function, WindowFunctionKind::Rank);
        assert_eq!(spec.partition_by, vec!["dept"]);
        assert_eq!(spec.order_by[0].null_ordering(), NullOrdering::First);
        assert_eq!(spec.output_name(), "r");
        assert!(spec.validate(&schema()).is_ok());
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(WindowSpec::dense_rank().output_name(), "dense_rank");
        assert_eq!(WindowSpec::lag("salary", 1, 0).output_name(), "lag");
    }

    #[test]
    fn test_ranking_requires_order_by() {
        for spec in [
            WindowSpec::rank(),
            WindowSpec::dense_rank(),
            WindowSpec::percent_rank(),
            WindowSpec::cume_dist(),
        ] {
            let err = spec.validate(&schema()).unwrap_err();
            assert!(matches!(err, Error::EmptyOrderingKey(_)), "{}", spec);
        }
    }

    #[test]
    fn test_unordered_functions_allowed() {
        for spec in [
            WindowSpec::row_number(),
            WindowSpec::ntile(2),
            WindowSpec::lag("salary", 1, Value::null_unknown()),
            WindowSpec::lead("salary", 1, Value::null_unknown()),
        ] {
            assert!(spec.validate(&schema()).is_ok(), "{}", spec);
        }
    }

    #[test]
    fn test_validate_unknown_columns() {
        let s = schema();
        assert_eq!(
            WindowSpec::row_number()
                .partition_by("region")
                .validate(&s)
                .unwrap_err(),
            Error::column_not_found("region")
        );
        assert_eq!(
            WindowSpec::rank()
                .order_by(OrderByColumn::asc("age"))
                .validate(&s)
                .unwrap_err(),
            Error::column_not_found("age")
        );
        assert_eq!(
            WindowSpec::lag("bonus", 1, 0).validate(&s).unwrap_err(),
            Error::column_not_found("bonus")
        );
    }

    #[test]
    fn test_validate_arguments() {
        let s = schema();
        assert!(matches!(
            WindowSpec::ntile(0).validate(&s),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            WindowSpec::lead("salary", i64::MIN, 0).validate(&s),
            Err(Error::InvalidOffset(_))
        ));
    }

    #[test]
    fn test_output_type() {
        let s = schema();
        assert_eq!(WindowSpec::rank().output_type(&s).unwrap(), DataType::Integer);
        assert_eq!(
            WindowSpec::percent_rank().output_type(&s).unwrap(),
            DataType::Float
        );
        assert_eq!(
            WindowSpec::lag("name", 1, Value::null_unknown())
                .output_type(&s)
                .unwrap(),
            DataType::Text
        );
        assert_eq!(
            WindowSpec::lead("misc", 1, 0).output_type(&s).unwrap(),
            DataType::Integer
        );
    }

    #[test]
    fn test_lag_default_takes_column_type() {
        let s = schema();
        let values = [Value::Float(4.0), Value::Float(5.0)];
        let ties = [false, false];
        let partition = crate::functions::WindowPartition::new(2, &values, &ties);

        let function = WindowSpec::lag("salary", 1, 0).prepare(&s).unwrap();
        assert_eq!(
            function.evaluate(&partition).unwrap(),
            vec![Value::Float(0.0), Value::Float(4.0)]
        );
        assert_eq!(
            WindowSpec::lag("salary", 1, 0).output_type(&s).unwrap(),
            DataType::Float
        );

        assert!(matches!(
            WindowSpec::lag("salary", 1, "none").validate(&s),
            Err(Error::InvalidArgument(_))
        ));
        // Untyped columns keep the default as given
        assert!(WindowSpec::lead("misc", 1, "none").validate(&s).is_ok());
    }

    #[test]
    fn test_display() {
        let spec = WindowSpec::lag("salary", 2, "n/a")
            .partition_by("dept")
            .order_by(OrderByColumn::asc("name").nulls_first())
            .alias("prev");
        assert_eq!(
            spec.to_string(),
            "LAG(salary, 2, 'n/a') OVER (PARTITION BY dept ORDER BY name ASC NULLS FIRST) AS prev"
        );
        assert_eq!(WindowSpec::row_number().to_string(), "ROW_NUMBER() OVER ()");
    }
}
