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

//! Syntax tree for window calls
//!
//! The parser produces a [`WindowCall`], which is purely syntactic. Turning
//! it into an executable [`WindowSpec`] checks the function name and its
//! arguments.

use std::fmt;

use super::token::Position;
use crate::core::{Error, Result, Value};
use crate::executor::{OrderByColumn, WindowFunctionKind, WindowSpec};
use crate::functions::global_registry;

/// A function argument as written
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Bare or quoted identifier
    Column(String),
    /// Literal scalar (number, string, boolean, NULL, DATE/TIMESTAMP)
    Literal(Value),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Column(name) => write!(f, "{}", name),
            Argument::Literal(Value::Text(s)) => write!(f, "'{}'", s),
            Argument::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// `name(args) OVER (PARTITION BY ... ORDER BY ...) [AS alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCall {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub partition_by: Vec<String>,
    pub order_by: Vec<OrderByColumn>,
    pub alias: Option<String>,
    /// Position of the function name
    pub position: Position,
}

impl WindowCall {
    /// Resolve the function and its arguments into a [`WindowSpec`]
    ///
    /// Errors: `UnknownFunction` for an unregistered name, `InvalidArgument`
    /// for a wrong argument count or kind, `InvalidOffset` for a LAG/LEAD
    /// offset that is not an integer literal.
    pub fn into_spec(self) -> Result<WindowSpec> {
        let info = global_registry().validate_call(&self.name, self.arguments.len())?;

        let function = match info.name() {
            "ROW_NUMBER" => WindowFunctionKind::RowNumber,
            "RANK" => WindowFunctionKind::Rank,
            "DENSE_RANK" => WindowFunctionKind::DenseRank,
            "PERCENT_RANK" => WindowFunctionKind::PercentRank,
            "CUME_DIST" => WindowFunctionKind::CumeDist,
            "NTILE" => match &self.arguments[0] {
                Argument::Literal(Value::Integer(buckets)) => WindowFunctionKind::Ntile(*buckets),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "NTILE bucket count must be an integer literal, got {}",
                        other
                    )))
                }
            },
            "LAG" | "LEAD" => {
                let (column, offset, default) = offset_arguments(info.name(), &self.arguments)?;
                if info.name() == "LAG" {
                    WindowFunctionKind::Lag {
                        column,
                        offset,
                        default,
                    }
                } else {
                    WindowFunctionKind::Lead {
                        column,
                        offset,
                        default,
                    }
                }
            }
            other => return Err(Error::UnknownFunction(other.to_string())),
        };

        Ok(WindowSpec {
            function,
            partition_by: self.partition_by,
            order_by: self.order_by,
            alias: self.alias,
        })
    }
}

/// Split LAG/LEAD arguments into (column, offset, default)
fn offset_arguments(function: &str, arguments: &[Argument]) -> Result<(String, i64, Value)> {
    let column = match &arguments[0] {
        Argument::Column(name) => name.clone(),
        Argument::Literal(value) => {
            return Err(Error::invalid_argument(format!(
                "{} expects a column as its first argument, got {}",
                function, value
            )))
        }
    };

    let offset = match arguments.get(1) {
        None => 1,
        Some(Argument::Literal(Value::Integer(offset))) => *offset,
        Some(other) => {
            return Err(Error::invalid_offset(format!(
                "{} offset must be an integer literal, got {}",
                function, other
            )))
        }
    };

    let default = match arguments.get(2) {
        None => Value::null_unknown(),
        Some(Argument::Literal(value)) => value.clone(),
        Some(Argument::Column(name)) => {
            return Err(Error::invalid_argument(format!(
                "{} default must be a literal, got column {}",
                function, name
            )))
        }
    };

    Ok((column, offset, default))
}
