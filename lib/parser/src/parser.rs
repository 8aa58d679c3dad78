mod expr;

use cursor::Line;
pub use expr::{Expr, LiteralValue};
use scanner::{Token, TokenData, TokenType};

use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expect expression.")]
    ExpectedExpression,
    #[error("expect ')' after expression.")]
    MissingRightParen,
    #[error("expect end of input after expression.")]
    ExpectedEndOfInput,
    #[error("expression nests too deeply.")]
    TooDeeplyNested,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] ParseError {error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub line: Line,
}

impl ParseError {
    pub fn new(error: ParseErrorType, line: Line) -> Self {
        Self { error, line }
    }
}

impl ParseErrorType {
    fn at(self, token: &Token) -> ParseError {
        ParseError::new(self, token.line())
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Maximum number of nested groupings and unary operators in one expression.
pub const MAX_DEPTH: usize = 255;

/// Recursive descent parser for a single expression.
///
/// Each precedence level is one method that parses its operands with the
/// next-tighter level:
///
/// ```text
/// expression  := equality
/// equality    := comparison ( ("!=" | "==") comparison )*
/// comparison  := term ( (">" | ">=" | "<" | "<=") term )*
/// term        := factor ( ("-" | "+") factor )*
/// factor      := unary ( ("/" | "*") unary )*
/// unary       := ("!" | "-") unary | primary
/// primary     := NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        // Everything below relies on the sequence being Eof-terminated.
        if tokens.last().map(Token::ty) != Some(TokenType::Eof) {
            let line = tokens.last().map(Token::line).unwrap_or_default();
            tokens.push(Token::new(Eof, "", line));
        }
        Self { tokens, current: 0, depth: 0 }
    }

    pub fn parse(mut self) -> Result<Expr<'a>> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(ParseErrorType::ExpectedEndOfInput.at(self.peek()));
        }

        log::debug!("Parsed {expr}");
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek().data {
            let operator = self.advance();
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek().data {
            let operator = self.advance();
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Plus | Minus = self.peek().data {
            let operator = self.advance();
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Star | Slash = self.peek().data {
            let operator = self.advance();
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Minus | Bang = self.peek().data {
            let operator = self.advance();
            let right = Box::new(self.nested(Self::unary)?);
            return Ok(Expr::Unary { operator, right });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let data = self.peek().data;
        let value = match data {
            False => LiteralValue::Boolean(false),
            True => LiteralValue::Boolean(true),
            Nil => LiteralValue::Nil,
            Number(n) => LiteralValue::Number(n),
            Str(s) => LiteralValue::Str(s),
            LeftParen => {
                self.advance();
                let expression = Box::new(self.nested(Self::expression)?);
                self.consume_or_error(TokenType::RightParen, ParseErrorType::MissingRightParen)?;
                return Ok(Expr::Grouping(expression));
            }
            _ => return Err(ParseErrorType::ExpectedExpression.at(self.peek())),
        };

        self.advance();
        Ok(Expr::Literal(value))
    }

    fn nested(&mut self, rule: fn(&mut Self) -> Result<Expr<'a>>) -> Result<Expr<'a>> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseErrorType::TooDeeplyNested.at(self.peek()));
        }
        self.depth += 1;
        let expr = rule(self);
        self.depth -= 1;
        expr
    }

    fn consume_or_error(&mut self, ty: TokenType, error_type: ParseErrorType) -> Result<Token<'a>> {
        if self.peek().ty() == ty {
            Ok(self.advance())
        } else {
            Err(error_type.at(self.peek()))
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn peek(&self) -> &Token<'a> {
        // `current` never moves past the trailing Eof.
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token<'a> {
        let token = *self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    // Only the final token ends the input; an Eof anywhere else is a leftover token.
    fn is_at_end(&self) -> bool {
        self.current + 1 >= self.tokens.len()
    }
}

/// Parses a complete token sequence as one expression.
pub fn parse(tokens: Vec<Token<'_>>) -> Result<Expr<'_>> {
    Parser::new(tokens).parse()
}
