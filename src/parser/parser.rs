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
//! ```text
//! call     := name '(' [arg {',' arg}] ')' OVER '(' [partition] [order] ')' [[AS] alias]
//! partition:= PARTITION BY column {',' column}
//! order    := ORDER BY item {',' item}
//! item     := column [ASC | DESC] [NULLS (FIRST | LAST)]
//! arg      := column | ['+' | '-'] number | 'string' | TRUE | FALSE | NULL
//!           | DATE 'yyyy-mm-dd' | TIMESTAMP 'yyyy-mm-dd hh:mm:ss'
//! ```

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use super::ast::{Argument, WindowCall};
use super::error::ParseError;
use super::lexer::Lexer;
use super::token::{Token, TokenType};
use crate::core::{parse_timestamp, SortDirection, Value};
use crate::executor::OrderByColumn;

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Keywords that can never be a column name or alias
static RESERVED_KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "OVER",
        "PARTITION",
        "ORDER",
        "BY",
        "ASC",
        "DESC",
        "NULLS",
        "AS",
        "NULL",
        "TRUE",
        "FALSE",
        // FIRST, LAST, DATE and TIMESTAMP stay usable as column names
    ]
    .into_iter()
    .collect()
});

/// Parser over a window-call token stream
pub struct Parser {
    /// The lexer providing tokens
    lexer: Lexer,
    /// Current token being examined
    cur_token: Token,
    /// Next token (peek)
    peek_token: Token,
    /// Source text, attached to errors
    input: String,
}

impl Parser {
    /// Create a new parser for the given input
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let cur_token = Self::read_token(&mut lexer);
        let peek_token = Self::read_token(&mut lexer);

        Parser {
            lexer,
            cur_token,
            peek_token,
            input: input.to_string(),
        }
    }

    /// Next non-comment token
    fn read_token(lexer: &mut Lexer) -> Token {
        loop {
            let token = lexer.next_token();
            if token.token_type != TokenType::Comment {
                return token;
            }
        }
    }

    /// Advance to the next token
    fn next_token(&mut self) {
        let next = Self::read_token(&mut self.lexer);
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    fn error_at_current(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cur_token.position).with_context(self.input.clone())
    }

    /// Error for an unexpected current token
    fn unexpected(&self, expected: &str) -> ParseError {
        let token = &self.cur_token;
        let message = match token.token_type {
            TokenType::Error => token
                .error
                .clone()
                .unwrap_or_else(|| "invalid token".to_string()),
            TokenType::Eof => format!("expected {}, found end of input", expected),
            _ => format!("expected {}, found '{}'", expected, token.literal),
        };
        self.error_at_current(message)
    }

    fn expect_punctuator(&mut self, punct: &str) -> ParseResult<()> {
        if !self.cur_token.is_punctuator(punct) {
            return Err(self.unexpected(&format!("'{}'", punct)));
        }
        self.next_token();
        Ok(())
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if !self.cur_token.is_keyword(keyword) {
            return Err(self.unexpected(keyword));
        }
        self.next_token();
        Ok(())
    }

    fn is_reserved_keyword(literal: &str) -> bool {
        RESERVED_KEYWORDS.contains(literal.to_uppercase().as_str())
    }

    /// Check if the current token can be used as a column name
    fn cur_token_is_identifier_like(&self) -> bool {
        match self.cur_token.token_type {
            TokenType::Identifier => true,
            TokenType::Keyword => !Self::is_reserved_keyword(&self.cur_token.literal),
            _ => false,
        }
    }

    fn parse_identifier(&mut self, what: &str) -> ParseResult<String> {
        if !self.cur_token_is_identifier_like() {
            return Err(self.unexpected(what));
        }
        let name = self.cur_token.literal.clone();
        self.next_token();
        Ok(name)
    }

    /// Parse exactly one window call followed by end of input
    pub fn parse_single(&mut self) -> ParseResult<WindowCall> {
        let call = self.parse_window_call()?;
        self.skip_semicolon();
        if !self.cur_token.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(call)
    }

    /// Parse a comma-separated list of window calls
    pub fn parse_list(&mut self) -> ParseResult<Vec<WindowCall>> {
        let mut calls = vec![self.parse_window_call()?];
        while self.cur_token.is_punctuator(",") {
            self.next_token();
            calls.push(self.parse_window_call()?);
        }
        self.skip_semicolon();
        if !self.cur_token.is_eof() {
            return Err(self.unexpected("',' or end of input"));
        }
        Ok(calls)
    }

    fn skip_semicolon(&mut self) {
        if self.cur_token.is_punctuator(";") {
            self.next_token();
        }
    }

    /// Parse `name(args) OVER (...) [[AS] alias]`
    pub fn parse_window_call(&mut self) -> ParseResult<WindowCall> {
        let position = self.cur_token.position;
        if self.cur_token.token_type != TokenType::Identifier {
            return Err(self.unexpected("window function name"));
        }
        let name = self.cur_token.literal.clone();
        self.next_token();

        self.expect_punctuator("(")?;
        let arguments = self.parse_arguments()?;
        self.expect_punctuator(")")?;

        self.expect_keyword("OVER")?;
        self.expect_punctuator("(")?;
        let partition_by = self.parse_partition_by()?;
        let order_by = self.parse_order_by()?;
        self.expect_punctuator(")")?;

        let alias = self.parse_alias()?;

        Ok(WindowCall {
            name,
            arguments,
            partition_by,
            order_by,
            alias,
            position,
        })
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        if self.cur_token.is_punctuator(")") {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_argument()?);
            if !self.cur_token.is_punctuator(",") {
                return Ok(arguments);
            }
            self.next_token();
        }
    }

    fn parse_argument(&mut self) -> ParseResult<Argument> {
        let token = self.cur_token.clone();
        match token.token_type {
            TokenType::Operator => {
                let negative = token.is_operator("-");
                self.next_token();
                match self.cur_token.token_type {
                    TokenType::Integer | TokenType::Float => {
                        let value = self.parse_number(negative)?;
                        Ok(Argument::Literal(value))
                    }
                    _ => Err(self.unexpected("number after sign")),
                }
            }
            TokenType::Integer | TokenType::Float => {
                let value = self.parse_number(false)?;
                Ok(Argument::Literal(value))
            }
            TokenType::String => {
                self.next_token();
                Ok(Argument::Literal(Value::text(token.literal)))
            }
            TokenType::Keyword if token.is_keyword("NULL") => {
                self.next_token();
                Ok(Argument::Literal(Value::null_unknown()))
            }
            TokenType::Keyword if token.is_keyword("TRUE") || token.is_keyword("FALSE") => {
                self.next_token();
                Ok(Argument::Literal(Value::Boolean(token.is_keyword("TRUE"))))
            }
            TokenType::Keyword
                if (token.is_keyword("DATE") || token.is_keyword("TIMESTAMP"))
                    && self.peek_token.token_type == TokenType::String =>
            {
                self.next_token();
                let literal = self.cur_token.literal.clone();
                let timestamp = parse_timestamp(&literal).map_err(|_| {
                    self.error_at_current(format!(
                        "invalid {} literal '{}'",
                        token.literal, literal
                    ))
                })?;
                self.next_token();
                Ok(Argument::Literal(Value::Timestamp(timestamp)))
            }
            _ => {
                let name = self.parse_identifier("argument")?;
                Ok(Argument::Column(name))
            }
        }
    }

    /// Parse the current Integer/Float token, applying a leading sign
    fn parse_number(&mut self, negative: bool) -> ParseResult<Value> {
        let literal = &self.cur_token.literal;
        let value = if self.cur_token.token_type == TokenType::Integer {
            let text = if negative {
                format!("-{}", literal)
            } else {
                literal.clone()
            };
            text.parse::<i64>().map(Value::Integer).map_err(|_| {
                self.error_at_current(format!("integer literal {} out of range", text))
            })?
        } else {
            let v = literal
                .parse::<f64>()
                .map_err(|_| self.error_at_current(format!("invalid number '{}'", literal)))?;
            Value::Float(if negative { -v } else { v })
        };
        self.next_token();
        Ok(value)
    }

    fn parse_partition_by(&mut self) -> ParseResult<Vec<String>> {
        if !self.cur_token.is_keyword("PARTITION") {
            return Ok(Vec::new());
        }
        self.next_token();
        self.expect_keyword("BY")?;

        let mut columns = vec![self.parse_identifier("partition column")?];
        while self.cur_token.is_punctuator(",") {
            self.next_token();
            columns.push(self.parse_identifier("partition column")?);
        }
        Ok(columns)
    }

    fn parse_order_by(&mut self) -> ParseResult<Vec<OrderByColumn>> {
        if !self.cur_token.is_keyword("ORDER") {
            return Ok(Vec::new());
        }
        self.next_token();
        self.expect_keyword("BY")?;

        let mut items = vec![self.parse_order_item()?];
        while self.cur_token.is_punctuator(",") {
            self.next_token();
            items.push(self.parse_order_item()?);
        }
        Ok(items)
    }

    fn parse_order_item(&mut self) -> ParseResult<OrderByColumn> {
        let column = self.parse_identifier("order column")?;

        let direction = if self.cur_token.is_keyword("DESC") {
            self.next_token();
            SortDirection::Desc
        } else {
            if self.cur_token.is_keyword("ASC") {
                self.next_token();
            }
            SortDirection::Asc
        };
        let mut item = OrderByColumn::new(column, direction);

        if self.cur_token.is_keyword("NULLS") {
            self.next_token();
            if self.cur_token.is_keyword("FIRST") {
                item = item.nulls_first();
            } else if self.cur_token.is_keyword("LAST") {
                item = item.nulls_last();
            } else {
                return Err(self.unexpected("FIRST or LAST"));
            }
            self.next_token();
        }
        Ok(item)
    }

    fn parse_alias(&mut self) -> ParseResult<Option<String>> {
        if self.cur_token.is_keyword("AS") {
            self.next_token();
            return self.parse_identifier("alias").map(Some);
        }
        if self.cur_token.token_type == TokenType::Identifier {
            let alias = self.cur_token.literal.clone();
            self.next_token();
            return Ok(Some(alias));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NullOrdering;

    fn parse(sql: &str) -> WindowCall {
        Parser::new(sql).parse_single().unwrap()
    }

    fn parse_err(sql: &str) -> ParseError {
        Parser::new(sql).parse_single().unwrap_err()
    }

    #[test]
    fn test_full_call() {
        let call = parse("RANK() OVER (PARTITION BY dept, team ORDER BY salary DESC, id) AS r");
        assert_eq!(call.name, "RANK");
        assert!(call.arguments.is_empty());
        assert_eq!(call.partition_by, vec!["dept", "team"]);
        assert_eq!(
            call.order_by,
            vec![OrderByColumn::desc("salary"), OrderByColumn::asc("id")]
        );
        assert_eq!(call.alias.as_deref(), Some("r"));
    }

    #[test]
    fn test_empty_over_and_bare_alias() {
        let call = parse("row_number() over () rn");
        assert!(call.partition_by.is_empty());
        assert!(call.order_by.is_empty());
        assert_eq!(call.alias.as_deref(), Some("rn"));
    }

    #[test]
    fn test_arguments() {
        let call = parse("LAG(value, -2, 'none') OVER (ORDER BY ts)");
        assert_eq!(
            call.arguments,
            vec![
                Argument::Column("value".into()),
                Argument::Literal(Value::Integer(-2)),
                Argument::Literal(Value::text("none")),
            ]
        );

        let call = parse("LEAD(d, +1, DATE '2024-01-31') OVER (ORDER BY d)");
        assert_eq!(call.arguments[1], Argument::Literal(Value::Integer(1)));
        assert_eq!(
            call.arguments[2],
            Argument::Literal(Value::date(2024, 1, 31).unwrap())
        );

        let call = parse("LEAD(x, 1, NULL) OVER ()");
        assert_eq!(call.arguments[2], Argument::Literal(Value::null_unknown()));

        let call = parse("LEAD(x, 1.5, TRUE) OVER ()");
        assert_eq!(call.arguments[1], Argument::Literal(Value::Float(1.5)));
        assert_eq!(call.arguments[2], Argument::Literal(Value::Boolean(true)));
    }

    #[test]
    fn test_min_integer_literal() {
        let call = parse("LAG(x, -9223372036854775808) OVER ()");
        assert_eq!(call.arguments[1], Argument::Literal(Value::Integer(i64::MIN)));
        let err = parse_err("LAG(x, 9223372036854775808) OVER ()");
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_null_placement() {
        let call = parse("RANK() OVER (ORDER BY a ASC NULLS FIRST, b DESC NULLS LAST)");
        assert_eq!(call.order_by[0].nulls, Some(NullOrdering::First));
        assert_eq!(call.order_by[1].direction, SortDirection::Desc);
        assert_eq!(call.order_by[1].nulls, Some(NullOrdering::Last));
    }

    #[test]
    fn test_soft_keywords_as_columns() {
        // Keyword spelling is normalized; column lookup is case-insensitive
        let call = parse("LAG(date) OVER (PARTITION BY first ORDER BY last)");
        assert_eq!(call.arguments, vec![Argument::Column("DATE".into())]);
        assert_eq!(call.partition_by, vec!["FIRST"]);
        assert_eq!(call.order_by[0].column, "LAST");
    }

    #[test]
    fn test_quoted_identifiers() {
        let call = parse("DENSE_RANK() OVER (ORDER BY \"Order\") AS \"my rank\"");
        assert_eq!(call.order_by[0].column, "Order");
        assert_eq!(call.alias.as_deref(), Some("my rank"));
    }

    #[test]
    fn test_list() {
        let calls = Parser::new(
            "ROW_NUMBER() OVER (ORDER BY v) AS rn,\n  LAG(v) OVER (ORDER BY v) AS prev;",
        )
        .parse_list()
        .unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].name, "LAG");
        assert_eq!(calls[1].position.line, 2);
    }

    #[test]
    fn test_syntax_errors_carry_position() {
        let err = parse_err("RANK() (ORDER BY x)");
        assert_eq!(err.message, "expected OVER, found '('");
        assert_eq!(err.position.line, 1);
        assert_eq!(err.position.column, 8);

        let err = parse_err("RANK() OVER (ORDER x)");
        assert_eq!(err.message, "expected BY, found 'x'");

        let err = parse_err("RANK() OVER (ORDER BY x NULLS)");
        assert_eq!(err.message, "expected FIRST or LAST, found ')'");

        let err = parse_err("RANK() OVER (ORDER BY x");
        assert_eq!(err.message, "expected ')', found end of input");

        let err = parse_err("RANK() OVER () AS r extra");
        assert_eq!(err.message, "expected end of input, found 'extra'");

        let err = parse_err("LAG(x, 'a) OVER ()");
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn test_bad_date_literal() {
        let err = parse_err("LAG(x, 1, DATE 'yesterday') OVER ()");
        assert!(err.message.contains("invalid DATE literal"));
    }
}
