//! Lexer for the inequality grammar.
//!
//! Input is line oriented, so a lexer covers exactly one line. Scalar
//! literals are scanned loosely (sign, digits, `.`, `/` and an exponent)
//! and validated later by the scalar type, so the same lexer serves
//! integer, floating and rational input.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{ParseError, ParseErrorKind, ParseResult};
use crate::utils::location::{SourceLocation, Span};
use std::iter::Peekable;
use std::str::Chars;

/// A lexer for tokenizing one input line.
pub struct Lexer<'a> {
    /// The line text
    source: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset
    offset: usize,
    /// Line number reported in spans (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Byte offset where the current token starts
    token_offset: usize,
    /// Column where the current token starts
    token_column: usize,
    /// Whether we've hit the end of the line
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for `source`, reporting locations on `line`.
    pub fn new(source: &'a str, line: usize) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line,
            column: 1,
            token_offset: 0,
            token_column: 1,
            at_eof: false,
        }
    }

    fn mark_token_start(&mut self) {
        self.token_offset = self.offset;
        self.token_column = self.column;
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        self.column += 1;
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().map(&pred).unwrap_or(false) {
            self.advance();
        }
    }

    /// Skip whitespace and a trailing `#` comment.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while self.advance().is_some() {}
                }
                _ => break,
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let span = Span::new(self.line, self.token_column, self.column);
        let lexeme = self.source[self.token_offset..self.offset].to_string();
        Token::new(kind, span, lexeme)
    }

    fn make_error(&self, message: &str, kind: ParseErrorKind) -> ParseError {
        ParseError::new(message, SourceLocation::new(self.line, self.token_column), kind)
    }

    /// Scan a scalar literal. The first character is already consumed.
    fn scan_scalar(&mut self, first: char) -> ParseResult<Token> {
        if first == '-' && !self.peek().map(is_scalar_start).unwrap_or(false) {
            return Err(self.make_error(
                "expected digit after '-'",
                ParseErrorKind::UnexpectedChar,
            ));
        }
        self.advance_while(|c| c.is_ascii_digit() || c == '.' || c == '/');

        // Exponent, only when digits follow
        if matches!(self.peek(), Some('e') | Some('E')) {
            let exponent = match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => self.peek_nth(2).map(|c| c.is_ascii_digit()).unwrap_or(false),
                _ => false,
            };
            if exponent {
                self.advance(); // e
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }

        Ok(self.make_token(TokenKind::Scalar))
    }

    /// Scan a variable reference. The `x` is already consumed.
    fn scan_variable(&mut self) -> ParseResult<Token> {
        self.advance_while(|c| c == ' ' || c == '\t');
        if !self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            return Err(self.make_error(
                "expected variable index after 'x'",
                ParseErrorKind::InvalidVariable,
            ));
        }
        self.advance_while(|c| c.is_ascii_digit());
        Ok(self.make_token(TokenKind::Variable))
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();
        self.mark_token_start();

        let c = match self.advance() {
            Some(c) => c,
            None => {
                self.at_eof = true;
                return Ok(self.make_token(TokenKind::Eof));
            }
        };

        match c {
            '+' => Ok(self.make_token(TokenKind::Plus)),
            '[' => Ok(self.make_token(TokenKind::LeftBracket)),
            ']' => Ok(self.make_token(TokenKind::RightBracket)),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(self.make_token(TokenKind::LessEqual))
                } else {
                    Err(self.make_error(
                        "expected '<=', found single '<'",
                        ParseErrorKind::UnexpectedChar,
                    ))
                }
            }
            'x' => self.scan_variable(),
            c if c == '-' || is_scalar_start(c) => self.scan_scalar(c),
            _ => Err(self.make_error(
                &format!("unexpected character '{}'", c),
                ParseErrorKind::UnexpectedChar,
            )),
        }
    }

    /// Collect all tokens, ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = ParseResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            None
        } else {
            Some(self.next_token())
        }
    }
}

fn is_scalar_start(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source, 1).tokenize().unwrap()
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("   \t ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_inequality() {
        let kinds = token_kinds("3x1 + -2 x 2 <= 7");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Scalar,
                TokenKind::Variable,
                TokenKind::Plus,
                TokenKind::Scalar,
                TokenKind::Variable,
                TokenKind::LessEqual,
                TokenKind::Scalar,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexemes() {
        let tokens = lex("-2.5e-3x12 + 3/4 x 1");
        assert_eq!(tokens[0].lexeme, "-2.5e-3");
        assert_eq!(tokens[1].lexeme, "x12");
        assert_eq!(tokens[3].lexeme, "3/4");
        assert_eq!(tokens[4].variable_digits(), Some("1"));
    }

    #[test]
    fn test_exponent_needs_digits() {
        let mut lexer = Lexer::new("2e", 1);
        let first = lexer.next_token().unwrap();
        assert_eq!(first.lexeme, "2");
        // the dangling 'e' is not part of the literal
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_vector() {
        let kinds = token_kinds("[ 1 -1 0 ]");
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftBracket,
                TokenKind::Scalar,
                TokenKind::Scalar,
                TokenKind::Scalar,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = lex("1x1 <= 2 # upper bound on x1");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[3].lexeme, "2");
    }

    #[test]
    fn test_location_tracking() {
        let tokens = Lexer::new("  1x1 <= 4", 7).tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(7, 3, 4));
        assert_eq!(tokens[1].span, Span::new(7, 4, 6));
        assert_eq!(tokens[2].span, Span::new(7, 7, 9));
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("1x1 < 2", 3).tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar);
        assert_eq!(err.location, SourceLocation::new(3, 5));

        let err = Lexer::new("1x <= 2", 1).tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidVariable);

        let err = Lexer::new("1y1 <= 2", 1).tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 2));

        let err = Lexer::new("- 1x1 <= 2", 1).tokenize().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar);
    }
}
