//! Tokenizer for free expressions.
//!
//! The only context-sensitive rule is the percent suffix: a numeric literal
//! followed by `%` (whitespace allowed in between) becomes a single number
//! token holding the literal divided by 100. A `%` anywhere else is an
//! error.

use std::fmt;

use crate::error::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LeftParen,
    RightParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Identifier(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::DoubleStar => f.write_str("**"),
            Self::Slash => f.write_str("/"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// A token and the 1-based column it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

/// Splits `text` into tokens.
///
/// # Errors
///
/// Returns [`CalcError::Parse`] on a character outside the expression
/// grammar or a `%` that does not follow a number.
pub fn tokenize(text: &str) -> Result<Vec<Token>, CalcError> {
    Lexer::new(text).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek_at(
        &self,
        offset: usize,
    ) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(mut self) -> Result<Vec<Token>, CalcError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek_at(0) {
            let column = self.pos + 1;

            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let kind = if c.is_ascii_digit()
                || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()))
            {
                self.number()?
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.identifier()
            } else {
                self.pos += 1;
                match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' if self.peek_at(0) == Some('*') => {
                        self.pos += 1;
                        TokenKind::DoubleStar
                    }
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ',' => TokenKind::Comma,
                    '%' => {
                        return Err(CalcError::syntax(format!(
                            "'%' must follow a number (column {column})"
                        )));
                    }
                    other => {
                        return Err(CalcError::syntax(format!(
                            "unexpected character '{other}' at column {column}"
                        )));
                    }
                }
            };

            tokens.push(Token { kind, column });
        }

        Ok(tokens)
    }

    fn consume_digits(&mut self) {
        while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn number(&mut self) -> Result<TokenKind, CalcError> {
        let start = self.pos;

        self.consume_digits();
        if self.peek_at(0) == Some('.') {
            self.pos += 1;
            self.consume_digits();
        }
        if matches!(self.peek_at(0), Some('e' | 'E')) {
            let digit_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digit_at;
                self.consume_digits();
            }
        }

        let literal: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = literal
            .parse()
            .map_err(|_| CalcError::syntax(format!("invalid number '{literal}'")))?;

        // Percent suffix: `5%` and `5 %` both mean 0.05.
        let mut lookahead = self.pos;
        while self.chars.get(lookahead).is_some_and(|c| c.is_whitespace()) {
            lookahead += 1;
        }
        if self.chars.get(lookahead) == Some(&'%') {
            self.pos = lookahead + 1;
            return Ok(TokenKind::Number(value / 100.0));
        }

        Ok(TokenKind::Number(value))
    }

    fn identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek_at(0)
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        TokenKind::Identifier(self.chars[start..self.pos].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn tokenize_arithmetic() {
        assert_eq!(
            kinds("1 + 2*x"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Plus,
                TokenKind::Number(2.0),
                TokenKind::Star,
                TokenKind::Identifier("x".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_percent_literal_divides_by_hundred() {
        assert_eq!(kinds("5%"), vec![TokenKind::Number(0.05)]);
        assert_eq!(kinds("2.5 %"), vec![TokenKind::Number(0.025)]);
    }

    #[test]
    fn tokenize_leaves_plain_numbers_alone() {
        assert_eq!(
            kinds("5% + 10"),
            vec![
                TokenKind::Number(0.05),
                TokenKind::Plus,
                TokenKind::Number(10.0),
            ]
        );
    }

    #[test]
    fn tokenize_number_forms() {
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("1e3"), vec![TokenKind::Number(1000.0)]);
        assert_eq!(kinds("2.5E-2"), vec![TokenKind::Number(0.025)]);
        assert_eq!(kinds("7."), vec![TokenKind::Number(7.0)]);
    }

    #[test]
    fn tokenize_exponent_without_digits_is_an_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Identifier("e".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_double_star_is_power() {
        assert_eq!(
            kinds("2**3"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::DoubleStar,
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn tokenize_call_with_identifier_underscores() {
        assert_eq!(
            kinds("A_P(5%,10)"),
            vec![
                TokenKind::Identifier("A_P".to_string()),
                TokenKind::LeftParen,
                TokenKind::Number(0.05),
                TokenKind::Comma,
                TokenKind::Number(10.0),
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn tokenize_records_columns() {
        let tokens = tokenize("  x + 1").unwrap();

        let columns: Vec<_> = tokens.iter().map(|t| t.column).collect();
        assert_eq!(columns, vec![3, 5, 7]);
    }

    #[test]
    fn tokenize_rejects_stray_percent() {
        let result = tokenize("x%");

        assert_eq!(
            result,
            Err(CalcError::Parse(
                "invalid syntax: '%' must follow a number (column 2)".to_string()
            ))
        );
    }

    #[test]
    fn tokenize_rejects_unknown_characters() {
        let result = tokenize("import os; 1");

        assert_eq!(
            result,
            Err(CalcError::Parse(
                "invalid syntax: unexpected character ';' at column 10".to_string()
            ))
        );
    }
}
