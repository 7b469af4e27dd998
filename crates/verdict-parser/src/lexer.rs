//! FEEL lexer
//!
//! Converts expression text into a flat token sequence that always ends with
//! an [`TokenKind::End`] token.
//!
//! Two FEEL quirks are handled here rather than in the parser:
//! - a `-` directly before a digit is part of a negative number literal when a
//!   binary operand is expected (start of input, after an operator, `(`, `[`,
//!   `,` or `:`), and a subtraction operator otherwise;
//! - identifiers may contain spaces (`Monthly Salary`, `string length`), so a
//!   space only ends an identifier when what follows is a keyword, an
//!   operator, punctuation or the end of input.

use crate::error::{ParseError, Result};
use std::fmt;

/// FEEL reserved words
pub const KEYWORDS: &[&str] = &[
    "true", "false", "null", "and", "or", "not", "if", "then", "else", "in", "for", "some",
    "every", "return", "between", "instance", "of",
];

/// Returns true if `text` is a reserved word
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    String,
    Identifier,
    Keyword,
    Operator,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Colon,
    Comma,
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::End => "end of input",
        };
        f.write_str(name)
    }
}

/// A lexical token with its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// True for a keyword token with the given text
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// True for an operator token with the given text
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }
}

fn is_operator_char(c: u8) -> bool {
    matches!(c, b'+' | b'-' | b'*' | b'/' | b'<' | b'>' | b'=' | b'!')
}

/// Characters that end a space-separated identifier when they follow the space
fn is_operator_or_punctuation(c: u8) -> bool {
    is_operator_char(c) || matches!(c, b'(' | b')' | b'[' | b']' | b',' | b'.')
}

/// Single-use tokenizer over one expression
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    position: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize a whole expression
    pub fn tokenize(input: &str) -> Result<Vec<Token>> {
        Lexer::new(input).run()
    }

    fn run(mut self) -> Result<Vec<Token>> {
        loop {
            self.skip_whitespace();
            let Some(current) = self.peek() else {
                break;
            };

            let token = if self.starts_number(current) {
                self.number()
            } else if current == b'"' {
                self.string()?
            } else if current.is_ascii_alphabetic() || current == b'_' {
                self.identifier()
            } else if let Some(kind) = Self::punctuation(current) {
                self.position += 1;
                Token::new(kind, (current as char).to_string(), self.position - 1)
            } else if is_operator_char(current) {
                self.operator()
            } else {
                let character = self.input[self.position..]
                    .chars()
                    .next()
                    .unwrap_or(current as char);
                return Err(ParseError::UnexpectedCharacter {
                    character,
                    position: self.position,
                });
            };
            self.tokens.push(token);
        }

        self.tokens.push(Token::new(TokenKind::End, "", self.position));
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.position + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.position += 1;
        }
    }

    fn punctuation(c: u8) -> Option<TokenKind> {
        let kind = match c {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'.' => TokenKind::Dot,
            _ => return None,
        };
        Some(kind)
    }

    /// A `-` here would begin an operand rather than subtract from one
    fn operand_expected(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(last) => matches!(
                last.kind,
                TokenKind::Operator
                    | TokenKind::LeftParen
                    | TokenKind::LeftBracket
                    | TokenKind::Comma
                    | TokenKind::Colon
            ),
        }
    }

    fn starts_number(&self, current: u8) -> bool {
        let digit_at = |offset| self.peek_at(offset).is_some_and(|c: u8| c.is_ascii_digit());
        match current {
            c if c.is_ascii_digit() => true,
            b'.' => digit_at(1),
            b'-' if self.operand_expected() => {
                digit_at(1) || (self.peek_at(1) == Some(b'.') && digit_at(2))
            }
            _ => false,
        }
    }

    fn number(&mut self) -> Token {
        let start = self.position;
        if self.peek() == Some(b'-') {
            self.position += 1;
        }
        self.consume_digits();

        if self.peek() == Some(b'.') {
            self.position += 1;
            self.consume_digits();
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.position += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.position += 1;
            }
            self.consume_digits();
        }

        Token::new(TokenKind::Number, &self.input[start..self.position], start)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
        }
    }

    /// String literal; the token text keeps its quotes and escapes
    fn string(&mut self) -> Result<Token> {
        let start = self.position;
        self.position += 1;

        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString { position: start }),
                Some(b'"') => break,
                Some(b'\\') => {
                    self.position += 1;
                    if self.peek().is_some() {
                        self.advance_char();
                    }
                }
                Some(_) => self.advance_char(),
            }
        }
        self.position += 1;

        Ok(Token::new(
            TokenKind::String,
            &self.input[start..self.position],
            start,
        ))
    }

    /// Step over one (possibly multi-byte) character
    fn advance_char(&mut self) {
        let width = self.input[self.position..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.position += width;
    }

    fn identifier(&mut self) -> Token {
        let start = self.position;
        self.position += 1;

        while let Some(c) = self.peek() {
            if c == b' ' {
                if self.space_ends_identifier(start) {
                    break;
                }
            } else if !(c.is_ascii_alphanumeric() || c == b'_') {
                break;
            }
            self.position += 1;
        }

        let text = self.input[start..self.position].trim_end();
        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, start)
    }

    /// Decide whether the space at the current position terminates the identifier
    fn space_ends_identifier(&self, start: usize) -> bool {
        if is_keyword(self.input[start..self.position].trim_end()) {
            return true;
        }

        let mut lookahead = self.position + 1;
        while self
            .bytes
            .get(lookahead)
            .is_some_and(|c| c.is_ascii_whitespace())
        {
            lookahead += 1;
        }

        let Some(&next) = self.bytes.get(lookahead) else {
            return true;
        };
        if is_operator_or_punctuation(next) {
            return true;
        }

        let word_end = self.bytes[lookahead..]
            .iter()
            .position(|c| !(c.is_ascii_alphanumeric() || *c == b'_'))
            .map_or(self.bytes.len(), |offset| lookahead + offset);
        let next_word = &self.input[lookahead..word_end];
        !next_word.is_empty() && is_keyword(next_word)
    }

    fn operator(&mut self) -> Token {
        let start = self.position;
        let first = self.bytes[self.position];
        self.position += 1;

        let two_char = matches!(
            (first, self.peek()),
            (b'*', Some(b'*'))
                | (b'<', Some(b'='))
                | (b'>', Some(b'='))
                | (b'!', Some(b'='))
                | (b'=', Some(b'='))
        );
        if two_char {
            self.position += 1;
        }

        Token::new(TokenKind::Operator, &self.input[start..self.position], start)
    }
}
