//! Parser for inequality and vector lines.
//!
//! Grammar, one line at a time:
//!
//! ```text
//! term        ::= scalar variable
//! combination ::= term ("+" term)*
//! inequality  ::= combination "<=" scalar
//! vector      ::= "[" scalar* "]" | scalar*
//! ```
//!
//! Variables are written 1-based (`x1` is column 0) and at most
//! [`MAX_VARIABLES`] columns may be addressed.

use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::linalg::{Scalar, Vector};
use crate::utils::errors::{ParseError, ParseErrorKind, ParseResult};
use std::marker::PhantomData;

/// Largest 1-based variable index accepted by the parser.
pub const MAX_VARIABLES: usize = 1 << 16;

/// A single `coefficient · x(variable + 1)` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearTerm<F> {
    /// The coefficient
    pub coefficient: F,
    /// Zero-based column index
    pub variable: usize,
}

/// A non-empty sum of linear terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCombination<F> {
    /// Terms in source order
    pub terms: Vec<LinearTerm<F>>,
    /// Largest zero-based column index among the terms
    pub max_variable: usize,
}

impl<F: Scalar> LinearCombination<F> {
    /// Create an empty combination.
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            max_variable: 0,
        }
    }

    /// Append a term.
    pub fn add_term(&mut self, term: LinearTerm<F>) {
        self.max_variable = self.max_variable.max(term.variable);
        self.terms.push(term);
    }

    /// Number of columns needed to hold every term.
    pub fn dimensions(&self) -> usize {
        if self.terms.is_empty() {
            0
        } else {
            self.max_variable + 1
        }
    }

    /// Dense coefficient row of length `dimensions`. Terms on the same
    /// variable are summed rather than the last one winning, so `1x1 + 1x1`
    /// means `2x1`.
    pub fn coefficients(&self, dimensions: usize) -> Vec<F> {
        debug_assert!(self.dimensions() <= dimensions);
        let mut row = vec![F::zero(); dimensions];
        for term in &self.terms {
            if let Some(slot) = row.get_mut(term.variable) {
                *slot = *slot + term.coefficient;
            }
        }
        row
    }
}

impl<F: Scalar> Default for LinearCombination<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed `combination <= scalar` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearInequality<F> {
    /// Left-hand side
    pub lhs: LinearCombination<F>,
    /// Right-hand side bound
    pub rhs: F,
}

/// A parser for one line of input.
pub struct Parser<'a, F> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    _scalar: PhantomData<F>,
}

impl<'a, F: Scalar> Parser<'a, F> {
    /// Create a new parser from a lexer.
    pub fn new(mut lexer: Lexer<'a>) -> ParseResult<Self> {
        let first_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current: first_token.clone(),
            previous: first_token,
            _scalar: PhantomData,
        })
    }

    /// Parse a whole inequality line.
    pub fn parse_inequality(&mut self) -> ParseResult<LinearInequality<F>> {
        let lhs = self.parse_combination()?;
        if !self.check(TokenKind::LessEqual) {
            return Err(self.error_here(
                format!("expected '<=', found {}", self.current.kind),
                ParseErrorKind::ExpectedRelation,
            ));
        }
        self.advance()?;
        let rhs = self.parse_scalar()?;
        self.expect_end()?;
        Ok(LinearInequality { lhs, rhs })
    }

    /// Parse `term ("+" term)*`.
    pub fn parse_combination(&mut self) -> ParseResult<LinearCombination<F>> {
        let mut combination = LinearCombination::new();
        loop {
            combination.add_term(self.parse_term()?);
            if !self.match_token(TokenKind::Plus)? {
                break;
            }
        }
        Ok(combination)
    }

    /// Parse `scalar variable`.
    pub fn parse_term(&mut self) -> ParseResult<LinearTerm<F>> {
        let coefficient = self.parse_scalar()?;
        let variable = self.parse_variable()?;
        Ok(LinearTerm { coefficient, variable })
    }

    /// Parse a whole vector line, with or without brackets.
    pub fn parse_vector(&mut self) -> ParseResult<Vector<F>> {
        let bracketed = self.match_token(TokenKind::LeftBracket)?;
        let mut coords = Vec::new();
        while self.check(TokenKind::Scalar) {
            coords.push(self.parse_scalar()?);
        }
        if bracketed {
            self.consume(TokenKind::RightBracket)?;
        }
        self.expect_end()?;
        Ok(Vector::from(coords))
    }

    fn parse_scalar(&mut self) -> ParseResult<F> {
        let token = self.consume(TokenKind::Scalar)?;
        F::parse_literal(&token.lexeme).ok_or_else(|| {
            ParseError::new(
                format!("invalid scalar '{}'", token.lexeme),
                token.span.start(),
                ParseErrorKind::InvalidScalar,
            )
        })
    }

    fn parse_variable(&mut self) -> ParseResult<usize> {
        let token = self.consume(TokenKind::Variable)?;
        let invalid = |message: String| {
            ParseError::new(message, token.span.start(), ParseErrorKind::InvalidVariable)
        };
        let digits = token.variable_digits().unwrap_or_default();
        let index: usize = digits
            .parse()
            .map_err(|_| invalid(format!("variable index '{}' out of range", digits)))?;
        if index == 0 {
            return Err(invalid("variable index must be > 0".to_string()));
        }
        if index > MAX_VARIABLES {
            return Err(invalid(format!(
                "variable index {} exceeds the limit of {}",
                index, MAX_VARIABLES
            )));
        }
        Ok(index - 1)
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        if self.check(TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error_here(
                format!("expected end of line, found {}", self.current.kind),
                ParseErrorKind::UnexpectedToken,
            ))
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) -> ParseResult<&Token> {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(&self.previous)
    }

    fn consume(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            self.advance().cloned()
        } else {
            let error_kind = if self.check(TokenKind::Eof) {
                ParseErrorKind::UnexpectedEol
            } else {
                ParseErrorKind::UnexpectedToken
            };
            Err(self.error_here(
                format!("expected {}, found {}", kind, self.current.kind),
                error_kind,
            ))
        }
    }

    fn match_token(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn error_here(&self, message: String, kind: ParseErrorKind) -> ParseError {
        ParseError::new(message, self.current.span.start(), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::location::SourceLocation;
    use num_rational::Rational64;

    fn inequality<F: Scalar>(source: &str) -> ParseResult<LinearInequality<F>> {
        Parser::new(Lexer::new(source, 1))?.parse_inequality()
    }

    fn vector<F: Scalar>(source: &str) -> ParseResult<Vector<F>> {
        Parser::new(Lexer::new(source, 1))?.parse_vector()
    }

    #[test]
    fn test_inequality() {
        let ineq = inequality::<i64>("3x1 + -2x3 <= 7").unwrap();
        assert_eq!(ineq.rhs, 7);
        assert_eq!(
            ineq.lhs.terms,
            vec![
                LinearTerm { coefficient: 3, variable: 0 },
                LinearTerm { coefficient: -2, variable: 2 },
            ]
        );
        assert_eq!(ineq.lhs.max_variable, 2);
        assert_eq!(ineq.lhs.coefficients(3), vec![3, 0, -2]);
    }

    #[test]
    fn test_repeated_variable_is_summed() {
        let ineq = inequality::<i64>("1x2 + 2x2 + -1x1 <= 0").unwrap();
        assert_eq!(ineq.lhs.coefficients(2), vec![-1, 3]);
    }

    #[test]
    fn test_scalar_types() {
        let ineq = inequality::<f64>("0.5x1 + 1e1 x2 <= -2.25").unwrap();
        assert_eq!(ineq.lhs.coefficients(2), vec![0.5, 10.0]);
        assert_eq!(ineq.rhs, -2.25);

        let ineq = inequality::<Rational64>("1/3x1 <= -2/3").unwrap();
        assert_eq!(ineq.lhs.terms[0].coefficient, Rational64::new(1, 3));
        assert_eq!(ineq.rhs, Rational64::new(-2, 3));
    }

    #[test]
    fn test_vector() {
        assert_eq!(vector::<i64>("[ 1 -2 3 ]").unwrap(), Vector::from(vec![1, -2, 3]));
        assert_eq!(vector::<i64>("0 1").unwrap(), Vector::from(vec![0, 1]));
        assert_eq!(vector::<i64>("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_errors() {
        let err = inequality::<i64>("1x1 + 2x2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedRelation);
        assert_eq!(err.location, SourceLocation::new(1, 10));

        let err = inequality::<i64>("1x0 <= 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidVariable);
        assert_eq!(err.location, SourceLocation::new(1, 2));

        let err = inequality::<i64>("1.5x1 <= 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScalar);

        let err = inequality::<i64>("1x1 <=").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEol);

        let err = inequality::<i64>("1x1 <= 2 3").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.location, SourceLocation::new(1, 10));

        let err = inequality::<i64>("x1 <= 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

        let err = vector::<i64>("[ 1 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEol);
    }

    #[test]
    fn test_variable_index_limit() {
        let last = format!("1x{} <= 1", MAX_VARIABLES);
        let parsed = inequality::<i64>(&last).unwrap();
        assert_eq!(parsed.lhs.dimensions(), MAX_VARIABLES);

        let err = inequality::<i64>(&format!("1x{} <= 1", MAX_VARIABLES + 1)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidVariable);
        assert_eq!(err.location, SourceLocation::new(1, 2));

        let err = inequality::<i64>("2x1 + 1x4000000000000 <= 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidVariable);
        assert_eq!(err.location, SourceLocation::new(1, 8));
    }
}
