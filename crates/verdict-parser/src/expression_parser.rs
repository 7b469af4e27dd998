//! Expression parser
//!
//! Parses FEEL expression text into [`Expression`] AST nodes by recursive
//! descent, one method per precedence level from lowest to highest:
//!
//! ```text
//! conditional    if a then b else c      (both branches right-recursive)
//! logical or     a or b
//! logical and    a and b
//! comparison     < > <= >= = == !=
//! additive       + -
//! multiplicative * /
//! exponentiation **                      (right-associative)
//! unary          -x, not x
//! primary        literals, lists, variables, calls, (expr), property chains
//! ```

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use verdict_core::ast::{Expression, FunctionParameter, Operator, UnaryOperator};
use verdict_core::Value;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let tokens = Lexer::tokenize(input)?;
        Self::parse_tokens(&tokens)
    }

    /// Parse an already tokenized expression
    pub fn parse_tokens(tokens: &[Token]) -> Result<Expression> {
        Parser::new(tokens).parse()
    }
}

/// Cursor over a token slice
struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    end: Token,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let end_position = tokens.last().map_or(0, |t| t.position);
        Self {
            tokens,
            position: 0,
            end: Token::new(TokenKind::End, "", end_position),
        }
    }

    fn parse(&mut self) -> Result<Expression> {
        if self.is_at_end() {
            return Err(ParseError::EmptyExpression);
        }

        let expr = self.parse_conditional()?;

        if !self.is_at_end() {
            return Err(ParseError::UnexpectedToken {
                token: self.peek().text.clone(),
                position: self.peek().position,
            });
        }
        Ok(expr)
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.end)
    }

    fn peek_next(&self) -> &Token {
        self.tokens.get(self.position + 1).unwrap_or(&self.end)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::End)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd {
                expected: kind.to_string(),
            });
        }
        Err(ParseError::unexpected(self.peek()))
    }

    fn expect_keyword(&mut self, word: &str) -> Result<()> {
        if self.peek().is_keyword(word) {
            self.advance();
            return Ok(());
        }
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd {
                expected: format!("'{}'", word),
            });
        }
        Err(ParseError::unexpected(self.peek()))
    }

    /// Consume an operator token if it is one of `symbols`
    fn match_operator(&mut self, symbols: &[&str]) -> Option<Operator> {
        let token = self.peek();
        if token.kind != TokenKind::Operator || !symbols.contains(&token.text.as_str()) {
            return None;
        }
        let op = Operator::from_symbol(&token.text);
        self.advance();
        op
    }

    // ------------------------------------------------------------------
    // Precedence levels
    // ------------------------------------------------------------------

    fn parse_conditional(&mut self) -> Result<Expression> {
        if !self.peek().is_keyword("if") {
            return self.parse_logical_or();
        }
        self.advance();

        let condition = self.parse_logical_or()?;
        self.expect_keyword("then")?;
        let then_branch = self.parse_conditional()?;
        self.expect_keyword("else")?;
        let else_branch = self.parse_conditional()?;

        Ok(Expression::conditional(condition, then_branch, else_branch))
    }

    fn parse_logical_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_logical_and()?;
        while self.peek().is_keyword("or") {
            self.advance();
            let right = self.parse_logical_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_comparison()?;
        while self.peek().is_keyword("and") {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expression::binary(left, Operator::And, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_operator(&["<", ">", "<=", ">=", "=", "==", "!="]) {
            let right = self.parse_additive()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_operator(&["+", "-"]) {
            let right = self.parse_multiplicative()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_exponentiation()?;
        while let Some(op) = self.match_operator(&["*", "/"]) {
            let right = self.parse_exponentiation()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    /// `2 ** 3 ** 2` parses as `2 ** (3 ** 2)`
    fn parse_exponentiation(&mut self) -> Result<Expression> {
        let base = self.parse_unary()?;
        if self.match_operator(&["**"]).is_some() {
            let exponent = self.parse_exponentiation()?;
            return Ok(Expression::binary(base, Operator::Pow, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if self.peek().is_operator("-") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(UnaryOperator::Negate, operand));
        }
        if self.peek().is_keyword("not") && self.peek_next().kind != TokenKind::LeftParen {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(UnaryOperator::Not, operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                parse_number(&token.text).map(|n| Expression::literal(Value::Number(n)))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expression::literal(Value::String(unquote(&token.text))))
            }
            TokenKind::Keyword => self.parse_keyword(&token),
            TokenKind::Identifier => {
                self.advance();
                if self.check(TokenKind::LeftParen) {
                    return self.parse_function_call(token.text);
                }
                self.parse_property_chain(Expression::variable(token.text))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_conditional()?;
                self.expect(TokenKind::RightParen)?;
                self.parse_property_chain(inner)
            }
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::End => Err(ParseError::UnexpectedEnd {
                expected: "an operand".to_string(),
            }),
            _ => Err(ParseError::unexpected(&token)),
        }
    }

    fn parse_keyword(&mut self, token: &Token) -> Result<Expression> {
        let literal = match token.text.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            "not" if self.peek_next().kind == TokenKind::LeftParen => {
                self.advance();
                return self.parse_function_call("not".to_string());
            }
            _ => return Err(ParseError::unexpected(token)),
        };
        self.advance();
        Ok(Expression::literal(literal))
    }

    /// `base.a.b` becomes nested property accesses
    fn parse_property_chain(&mut self, mut base: Expression) -> Result<Expression> {
        while self.check(TokenKind::Dot) {
            self.advance();
            let property = self.peek().clone();
            if property.kind != TokenKind::Identifier {
                return Err(ParseError::InvalidPropertyAccess {
                    token: property.text,
                    position: property.position,
                });
            }
            self.advance();
            base = Expression::property(base, property.text);
        }
        Ok(base)
    }

    fn parse_list(&mut self) -> Result<Expression> {
        self.expect(TokenKind::LeftBracket)?;
        let mut items = Vec::new();

        while !self.check(TokenKind::RightBracket) {
            items.push(self.parse_conditional()?);
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.expect(TokenKind::RightBracket)?;
        Ok(Expression::list(items))
    }

    fn parse_function_call(&mut self, name: String) -> Result<Expression> {
        self.expect(TokenKind::LeftParen)?;
        let mut parameters: Vec<FunctionParameter> = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                let named = self.check(TokenKind::Identifier)
                    && self.peek_next().kind == TokenKind::Colon;

                if let Some(previous) = parameters.last() {
                    if previous.is_named() != named {
                        return Err(ParseError::MixedParameterStyles { function: name });
                    }
                }

                let parameter = if named {
                    let param_name = self.advance().text;
                    self.advance();
                    FunctionParameter::named(param_name, self.parse_conditional()?)
                } else {
                    FunctionParameter::positional(self.parse_conditional()?)
                };
                parameters.push(parameter);

                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(TokenKind::RightParen)?;
        Ok(Expression::function_call(name, parameters))
    }
}

fn parse_number(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

/// Strip the surrounding quotes of a string token and resolve escapes
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
