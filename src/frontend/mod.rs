//! Frontend: lexer and parser for textual systems of inequalities.
//!
//! ## Input format
//!
//! One inequality per line, blank line (or end of input) to finish:
//!
//! ```text
//! # triangle
//! -1x1 <= 0
//! -1x2 <= 0
//! 1x1 + 1x2 <= 4
//! ```
//!
//! Each term is a scalar followed by a 1-based variable. The polyhedron
//! has as many dimensions as the largest variable index used. Repeated
//! variables in one line are summed.

pub mod token;
pub mod lexer;
pub mod parser;
pub mod reader;

// Re-exports
pub use lexer::Lexer;
pub use parser::{LinearCombination, LinearInequality, LinearTerm, Parser, MAX_VARIABLES};
pub use reader::{Block, BlockReader, SourceLine};
pub use token::{Token, TokenKind};
pub use crate::utils::errors::ParseError;

use crate::linalg::{Scalar, Vector};
use crate::polyhedral::Polyhedron;
use crate::utils::errors::{ParseResult, PolyResult};
use std::io::BufRead;

/// Parse a single inequality line.
pub fn parse_inequality<F: Scalar>(line: &str) -> ParseResult<LinearInequality<F>> {
    reader::parse_inequality_line(line, 1)
}

/// Parse a single vector line such as `[ 1 0 -1 ]`.
pub fn parse_vector<F: Scalar>(line: &str) -> ParseResult<Vector<F>> {
    Parser::new(Lexer::new(line, 1))?.parse_vector()
}

/// Parse the inequalities of `text` up to the first blank line.
///
/// Comment-only lines are skipped. Text with no inequalities gives the
/// 0-dimensional polyhedron.
pub fn parse_polyhedron<F: Scalar>(text: &str) -> ParseResult<Polyhedron<F>> {
    let mut inequalities = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if inequalities.is_empty() {
                continue;
            }
            break;
        }
        if reader::is_comment(line) {
            continue;
        }
        inequalities.push(reader::parse_inequality_line(line, i + 1)?);
    }
    Ok(reader::assemble(&inequalities))
}

/// Read one polyhedron from `reader`: every line of the next block must be
/// an inequality. Returns `None` at end of input.
pub fn read_polyhedron<F: Scalar, R: BufRead>(
    reader: &mut BlockReader<R>,
) -> PolyResult<Option<Polyhedron<F>>> {
    let block = match reader.next_block()? {
        Some(block) => block,
        None => return Ok(None),
    };
    let inequalities = block
        .lines
        .iter()
        .map(|l| reader::parse_inequality_line(&l.text, l.number))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(Some(reader::assemble(&inequalities)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::{ParseErrorKind, PolyError};

    #[test]
    fn test_parse_polyhedron() {
        let p: Polyhedron<i64> = parse_polyhedron(
            "# triangle\n-1x1 <= 0\n-1x2 <= 0\n1x1 + 1x2 <= 4\n\n1x3 <= 9\n",
        )
        .unwrap();
        assert_eq!(p.a().shape(), (3, 2));
        assert_eq!(p.b(), &Vector::from(vec![0, 0, 4]));
    }

    #[test]
    fn test_parse_empty_text() {
        let p: Polyhedron<i64> = parse_polyhedron("\n# nothing\n").unwrap();
        assert_eq!(p.dimensions(), 0);
        assert_eq!(p.constraints(), 0);
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector::<i64>("[ 1 -1 ]").unwrap(), Vector::from(vec![1, -1]));
    }

    #[test]
    fn test_read_polyhedron() {
        let input = "1x1 <= 2\n\n-1x2 <= 1\n1x1 <= 0\n";
        let mut reader = BlockReader::new(input.as_bytes());
        let first: Polyhedron<i64> = read_polyhedron(&mut reader).unwrap().unwrap();
        assert_eq!(first.a().shape(), (1, 1));
        let second: Polyhedron<i64> = read_polyhedron(&mut reader).unwrap().unwrap();
        assert_eq!(second.a().shape(), (2, 2));
        assert!(read_polyhedron::<i64, _>(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_read_polyhedron_rejects_vectors() {
        let mut reader = BlockReader::new("1x1 <= 2\n1 0\n".as_bytes());
        let err = read_polyhedron::<i64, _>(&mut reader).unwrap_err();
        match err {
            PolyError::Parse(e) => {
                assert_eq!(e.kind, ParseErrorKind::UnexpectedToken);
                assert_eq!(e.location.line, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
