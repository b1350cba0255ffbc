//! Token types for the inequality grammar.

use crate::utils::location::Span;
use std::fmt;

/// A token in one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source span
    pub span: Span,
    /// The lexeme (raw text)
    pub lexeme: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, lexeme: String) -> Self {
        Self { kind, span, lexeme }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The digits of a variable token, without the leading `x` and any
    /// blanks after it.
    pub fn variable_digits(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Variable => self.lexeme.strip_prefix('x').map(str::trim_start),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Scalar literal, validated later by the scalar type
    Scalar,
    /// Variable reference such as `x3`
    Variable,
    /// `+`
    Plus,
    /// `<=`
    LessEqual,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// End of line
    Eof,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Scalar => "scalar",
            TokenKind::Variable => "variable",
            TokenKind::Plus => "'+'",
            TokenKind::LessEqual => "'<='",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Eof => "end of line",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_digits() {
        let tok = Token::new(TokenKind::Variable, Span::new(1, 1, 5), "x 12".to_string());
        assert_eq!(tok.variable_digits(), Some("12"));

        let tok = Token::new(TokenKind::Scalar, Span::new(1, 1, 2), "3".to_string());
        assert_eq!(tok.variable_digits(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::LessEqual.to_string(), "'<='");
        let tok = Token::new(TokenKind::Plus, Span::new(1, 4, 5), "+".to_string());
        assert_eq!(tok.to_string(), "Plus(+)");
    }
}
