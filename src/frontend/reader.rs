//! Splitting line-oriented input into blocks.
//!
//! A block is a run of non-blank lines. Its leading lines containing `<=`
//! are the inequalities of one polyhedron; any lines after them are
//! projection directions. Lines holding only a `#` comment are dropped.

use crate::frontend::lexer::Lexer;
use crate::frontend::parser::{LinearInequality, Parser};
use crate::linalg::{Matrix, Scalar, Vector};
use crate::polyhedral::Polyhedron;
use crate::utils::errors::ParseResult;
use std::io::{self, BufRead};

/// One input line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-indexed)
    pub number: usize,
    /// Line text without the terminator
    pub text: String,
}

/// A run of non-blank input lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The lines, comment-only lines removed
    pub lines: Vec<SourceLine>,
}

impl Block {
    /// Line number of the first line.
    pub fn first_line(&self) -> usize {
        self.lines.first().map_or(0, |l| l.number)
    }

    /// Lines making up the polyhedron.
    pub fn inequality_lines(&self) -> &[SourceLine] {
        let count = self
            .lines
            .iter()
            .take_while(|l| is_inequality(&l.text))
            .count();
        &self.lines[..count]
    }

    /// Lines following the polyhedron.
    pub fn direction_lines(&self) -> &[SourceLine] {
        &self.lines[self.inequality_lines().len()..]
    }

    /// Parse the inequality lines into a polyhedron.
    pub fn polyhedron<F: Scalar>(&self) -> ParseResult<Polyhedron<F>> {
        let inequalities = self
            .inequality_lines()
            .iter()
            .map(|l| parse_inequality_line(&l.text, l.number))
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(assemble(&inequalities))
    }

    /// Parse the direction lines into vectors.
    pub fn directions<F: Scalar>(&self) -> ParseResult<Vec<Vector<F>>> {
        self.direction_lines()
            .iter()
            .map(|l| Parser::new(Lexer::new(&l.text, l.number))?.parse_vector())
            .collect()
    }
}

/// Reads [`Block`]s from a buffered reader, tracking line numbers.
pub struct BlockReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> BlockReader<R> {
    /// Create a block reader.
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Read the next block, skipping leading blank lines. Returns `None` at
    /// end of input.
    pub fn next_block(&mut self) -> io::Result<Option<Block>> {
        let mut block = Block::default();
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;
            let text = buf.trim_end_matches(&['\n', '\r'][..]);
            if text.trim().is_empty() {
                if block.lines.is_empty() {
                    continue;
                }
                break;
            }
            if is_comment(text) {
                continue;
            }
            block.lines.push(SourceLine {
                number: self.line,
                text: text.to_string(),
            });
        }
        Ok(if block.lines.is_empty() { None } else { Some(block) })
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = io::Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Check if the line holds only a comment.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Check if the line, outside its comment, contains `<=`.
pub fn is_inequality(line: &str) -> bool {
    strip_comment(line).contains("<=")
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or(line)
}

pub(crate) fn parse_inequality_line<F: Scalar>(
    line: &str,
    number: usize,
) -> ParseResult<LinearInequality<F>> {
    Parser::new(Lexer::new(line, number))?.parse_inequality()
}

/// Build `P(A, b)` from parsed inequalities. The dimension is the largest
/// variable index seen; no inequalities give a 0-dimensional polyhedron.
pub(crate) fn assemble<F: Scalar>(inequalities: &[LinearInequality<F>]) -> Polyhedron<F> {
    let dimensions = inequalities
        .iter()
        .map(|i| i.lhs.dimensions())
        .max()
        .unwrap_or(0);
    let mut data = Vec::with_capacity(inequalities.len() * dimensions);
    let mut bounds = Vec::with_capacity(inequalities.len());
    for inequality in inequalities {
        data.extend(inequality.lhs.coefficients(dimensions));
        bounds.push(inequality.rhs);
    }
    Polyhedron {
        a: Matrix::from_raw_parts(inequalities.len(), dimensions, data),
        b: Vector::from(bounds),
    }
}
