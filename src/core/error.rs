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

//! Error types for Windowkit
//!
//! Every configuration problem is reported before any row is processed,
//! so a caller either gets a complete result or one of these errors.

use thiserror::Error;

/// Result type alias for Windowkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for window evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Schema errors
    // =========================================================================
    /// Column referenced by a window specification is absent from the schema
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Duplicate column name in schema or in the window output columns
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Row width does not match the schema
    #[error("table columns don't match, expected {expected}, got {got}")]
    TableColumnsNotMatch { expected: usize, got: usize },

    /// Unknown type name in a schema definition
    #[error("invalid column type '{0}'")]
    InvalidColumnType(String),

    // =========================================================================
    // Window configuration errors
    // =========================================================================
    /// LAG/LEAD offset is not an integer or cannot be represented
    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    /// Ranking function requires an ORDER BY clause
    #[error("{0} requires an ORDER BY clause in its window specification")]
    EmptyOrderingKey(String),

    /// Window function name is not registered
    #[error("unknown window function '{0}'")]
    UnknownFunction(String),

    /// Invalid argument for function
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Input / output errors
    // =========================================================================
    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON table could not be decoded or encoded
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error (wrapped)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl Error {
    /// Create a new TableColumnsNotMatch error
    pub fn table_columns_not_match(expected: usize, got: usize) -> Self {
        Error::TableColumnsNotMatch { expected, got }
    }

    /// Create a new ColumnNotFound error
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound(name.into())
    }

    /// Create a new InvalidOffset error
    pub fn invalid_offset(message: impl Into<String>) -> Self {
        Error::InvalidOffset(message.into())
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Error::Io {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ColumnNotFound(_) | Error::UnknownFunction(_))
    }

    /// Check if this error describes a bad window specification
    ///
    /// These are raised during validation, before any partition is built.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::ColumnNotFound(_)
                | Error::DuplicateColumn(_)
                | Error::InvalidOffset(_)
                | Error::EmptyOrderingKey(_)
                | Error::UnknownFunction(_)
                | Error::InvalidArgument(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
