//! Recursive-descent parser for free expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | IDENT | IDENT '(' args? ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! `**` is right-associative and binds tighter than a unary minus on its
//! left, so `-2**2` is `-4` and `2**-1` is `0.5`.
//!
//! Parentheses, call arguments, prefix operators and exponents may nest at
//! most [`MAX_DEPTH`] levels deep. Operator chains at one level are parsed
//! in a loop and may be of any length.

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{Token, TokenKind, tokenize};
use crate::error::CalcError;

/// Deepest nesting the parser accepts.
pub const MAX_DEPTH: usize = 200;

/// Parses a complete expression.
///
/// # Errors
///
/// Returns [`CalcError::Parse`] for empty input, unbalanced parentheses,
/// misplaced operators, trailing tokens, or nesting deeper than
/// [`MAX_DEPTH`].
pub fn parse_expression(text: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(CalcError::syntax("empty expression"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(parser.unexpected(token)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> Result<(), CalcError> {
        if self.eat(kind) {
            return Ok(());
        }
        match self.peek() {
            Some(token) => Err(self.unexpected(token)),
            None => Err(CalcError::syntax(format!(
                "expected '{kind}' before end of input"
            ))),
        }
    }

    fn unexpected(
        &self,
        token: &Token,
    ) -> CalcError {
        CalcError::syntax(format!(
            "unexpected '{}' at column {}",
            token.kind, token.column
        ))
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::syntax("expression is nested too deeply"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Multiply,
                Some(TokenKind::Slash) => BinaryOp::Divide,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.pos += 1;
        let operand = self.nested(Self::unary)?;
        Ok(Expr::unary(op, operand))
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::DoubleStar) {
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::binary(BinaryOp::Power, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let Some(token) = self.bump() else {
            return Err(CalcError::syntax("unexpected end of input"));
        };

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Identifier(name) => {
                if self.eat(&TokenKind::LeftParen) {
                    let args = self.nested(Self::arguments)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            TokenKind::LeftParen => {
                let inner = self.nested(Self::expr)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(inner)
            }
            other => Err(CalcError::syntax(format!(
                "unexpected '{other}' at column {}",
                token.column
            ))),
        }
    }

    /// Parses call arguments after the opening parenthesis, through the
    /// closing one.
    fn arguments(&mut self) -> Result<Vec<Expr>, CalcError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RightParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(args);
        }
    }
}
