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

//! Window-call parser
//!
//! Parses SQL window calls as they appear in a select list:
//!
//! - [`Lexer`] - Tokenizer
//! - [`Parser`] - Builds [`WindowCall`]s from tokens
//! - [`ast`] - Syntax tree and its lowering to [`WindowSpec`]
//! - [`error`] - Syntax errors with line/column
//!
//! # Example
//!
//! ```
//! use windowkit::parser::parse_window;
//!
//! let spec = parse_window("RANK() OVER (PARTITION BY dept ORDER BY salary DESC) AS r").unwrap();
//! assert_eq!(spec.output_name(), "r");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token;

pub use ast::{Argument, WindowCall};
pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Position, Token, TokenType};

use crate::core::Result;
use crate::executor::WindowSpec;

/// Parse one window call without resolving the function
pub fn parse_window_call(sql: &str) -> Result<WindowCall> {
    Ok(Parser::new(sql).parse_single()?)
}

/// Parse one window call into an executable [`WindowSpec`]
pub fn parse_window(sql: &str) -> Result<WindowSpec> {
    parse_window_call(sql)?.into_spec()
}

/// Parse a comma-separated list of window calls
///
/// The whole list is parsed before any call is resolved, so a syntax error
/// anywhere is reported ahead of function or argument errors.
pub fn parse_window_list(sql: &str) -> Result<Vec<WindowSpec>> {
    Parser::new(sql)
        .parse_list()?
        .into_iter()
        .map(WindowCall::into_spec)
        .collect()
}
