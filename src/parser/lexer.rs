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

//! Lexer (Tokenizer) for window-call text

use super::token::{is_keyword, is_operator_char, is_punctuator, Position, Token, TokenType};

/// Lexer for tokenizing window-call input
pub struct Lexer {
    /// Input string
    input: Vec<char>,
    /// Current position in input (points to current char)
    position: usize,
    /// Current reading position in input (after current char)
    read_position: usize,
    /// Current character under examination
    ch: char,
    /// Current position tracking
    pos: Position,
    /// Last error encountered
    last_error: Option<String>,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut lexer = Self {
            input: chars,
            position: 0,
            read_position: 0,
            ch: '\0',
            pos: Position::new(0, 1, 1),
            last_error: None,
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character
    fn read_char(&mut self) {
        // Update position before changing character
        if self.ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else if self.ch != '\0' {
            self.pos.column += 1;
        }

        if self.read_position >= self.input.len() {
            self.ch = '\0'; // EOF
            self.position = self.input.len();
        } else {
            self.ch = self.input[self.read_position];
            self.position = self.read_position;
            self.read_position += 1;
        }

        self.pos.offset = self.position;
    }

    /// Peek at the next character without advancing
    fn peek_char(&self) -> char {
        if self.read_position >= self.input.len() {
            '\0'
        } else {
            self.input[self.read_position]
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let pos = self.pos;

        match self.ch {
            '\0' => Token::eof(pos),

            // String literal (single quotes)
            '\'' => match self.read_string_literal() {
                Some(literal) => Token::new(TokenType::String, literal, pos),
                None => Token::error("unterminated string literal", "'", pos),
            },

            // Double-quoted identifier
            '"' => match self.read_quoted_identifier() {
                Some(literal) => Token::new(TokenType::Identifier, literal, pos),
                None => Token::error("unterminated quoted identifier", "\"", pos),
            },

            // Number literal; signs are separate operator tokens
            c if c.is_ascii_digit() => {
                let literal = self.read_number();
                if let Some(err) = self.last_error.take() {
                    return Token::error(err, literal, pos);
                }
                if literal.contains('.') || literal.contains('e') || literal.contains('E') {
                    Token::new(TokenType::Float, literal, pos)
                } else {
                    Token::new(TokenType::Integer, literal, pos)
                }
            }

            // Single line comment (--)
            '-' if self.peek_char() == '-' => {
                let literal = self.read_line_comment();
                Token::new(TokenType::Comment, literal, pos)
            }

            // Multi-line comment
            '/' if self.peek_char() == '*' => match self.read_block_comment() {
                Some(literal) => Token::new(TokenType::Comment, literal, pos),
                None => Token::error("unterminated block comment", "/*", pos),
            },

            c if is_punctuator(c) => {
                self.read_char();
                Token::new(TokenType::Punctuator, c.to_string(), pos)
            }

            c if is_operator_char(c) => {
                self.read_char();
                Token::new(TokenType::Operator, c.to_string(), pos)
            }

            // Identifier or keyword
            c if c.is_alphabetic() || c == '_' => {
                let literal = self.read_identifier();
                if is_keyword(&literal) {
                    Token::new(TokenType::Keyword, literal.to_uppercase(), pos)
                } else {
                    Token::new(TokenType::Identifier, literal, pos)
                }
            }

            // Unrecognized character
            c => {
                self.read_char();
                Token::error(
                    format!("unrecognized character: {:?}", c),
                    c.to_string(),
                    pos,
                )
            }
        }
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while self.ch.is_whitespace() {
            self.read_char();
        }
    }

    /// Read an identifier
    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        result.push(self.ch);
        self.read_char();

        while self.ch.is_alphanumeric() || self.ch == '_' {
            result.push(self.ch);
            self.read_char();
        }

        result
    }

    /// Read a number (integer or float)
    fn read_number(&mut self) -> String {
        let mut result = String::new();
        while self.ch.is_ascii_digit() {
            result.push(self.ch);
            self.read_char();
        }

        // Check for decimal point
        if self.ch == '.' && self.peek_char().is_ascii_digit() {
            result.push(self.ch);
            self.read_char();
            while self.ch.is_ascii_digit() {
                result.push(self.ch);
                self.read_char();
            }
        }

        // Check for exponent (E or e)
        if self.ch == 'e' || self.ch == 'E' {
            result.push(self.ch);
            self.read_char();

            if self.ch == '+' || self.ch == '-' {
                result.push(self.ch);
                self.read_char();
            }

            // Must have at least one digit after exponent
            if !self.ch.is_ascii_digit() {
                self.last_error = Some("invalid number format: exponent has no digits".to_string());
                return result;
            }

            while self.ch.is_ascii_digit() {
                result.push(self.ch);
                self.read_char();
            }
        }

        result
    }

    /// Read a single-quoted string literal, without the quotes
    ///
    /// A doubled quote ('') stands for one quote character. Returns `None`
    /// if the input ends before the closing quote.
    fn read_string_literal(&mut self) -> Option<String> {
        let mut result = String::new();
        self.read_char(); // consume opening quote

        loop {
            match self.ch {
                '\0' => {
                    self.last_error = Some("unterminated string literal".to_string());
                    return None;
                }
                '\'' if self.peek_char() == '\'' => {
                    result.push('\'');
                    self.read_char();
                    self.read_char();
                }
                '\'' => {
                    self.read_char();
                    return Some(result);
                }
                c => {
                    result.push(c);
                    self.read_char();
                }
            }
        }
    }

    /// Read a double-quoted identifier, without the quotes
    fn read_quoted_identifier(&mut self) -> Option<String> {
        let mut result = String::new();
        self.read_char(); // consume opening quote

        while self.ch != '\0' {
            // "abc""def" -> abc"def
            if self.ch == '"' && self.peek_char() == '"' {
                result.push('"');
                self.read_char();
                self.read_char();
            } else if self.ch == '"' {
                self.read_char();
                return Some(result);
            } else {
                result.push(self.ch);
                self.read_char();
            }
        }

        self.last_error = Some("unterminated quoted identifier".to_string());
        None
    }

    /// Read a single-line comment (--)
    fn read_line_comment(&mut self) -> String {
        let mut result = String::new();
        while self.ch != '\n' && self.ch != '\0' {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    /// Read a block comment (/* ... */)
    fn read_block_comment(&mut self) -> Option<String> {
        let mut result = String::from("/*");
        self.read_char();
        self.read_char();

        while !(self.ch == '*' && self.peek_char() == '/') {
            if self.ch == '\0' {
                self.last_error = Some("unterminated block comment".to_string());
                return None;
            }
            result.push(self.ch);
            self.read_char();
        }

        result.push_str("*/");
        self.read_char();
        self.read_char();
        Some(result)
    }

    /// Get the last error encountered
    pub fn get_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Tokenize the whole input, skipping comments, up to and including EOF
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.token_type == TokenType::Comment {
                continue;
            }
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}
