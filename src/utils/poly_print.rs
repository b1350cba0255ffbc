//! Textual rendering of polyhedra.
//!
//! Rows are written in the same grammar the frontend reads, so printed
//! output (apart from all-zero rows) parses back to the same system.

use crate::linalg::{Row, Scalar, Vector};
use crate::polyhedral::Polyhedron;
use std::fmt;

/// Pretty printer for polyhedra and vectors.
pub struct PolyPrinter {
    /// Indentation level
    indent: usize,
    /// Output buffer
    buffer: String,
}

impl PolyPrinter {
    /// Create a new printer.
    pub fn new() -> Self {
        Self {
            indent: 0,
            buffer: String::new(),
        }
    }

    /// Create a printer that indents every line by `indent` levels.
    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            buffer: String::new(),
        }
    }

    /// Get the output.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    /// Take the output.
    pub fn take_output(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buffer.push_str("  ");
        }
    }

    /// Print one inequality row without a line break.
    pub fn print_inequality<F: Scalar>(&mut self, row: Row<'_, F>, bound: F) {
        self.buffer.push_str(&format_inequality(row, bound));
    }

    /// Print every inequality of `p`, one per line.
    pub fn print_polyhedron<F: Scalar>(&mut self, p: &Polyhedron<F>) {
        for (row, bound) in p.a().iter_rows().zip(p.b().iter()) {
            self.write_indent();
            self.print_inequality(row, *bound);
            self.buffer.push('\n');
        }
    }

    /// Print a vector as `[ v0 v1 ... ]`.
    pub fn print_vector<F: Scalar>(&mut self, v: &Vector<F>) {
        self.buffer.push_str(&v.to_string());
    }

    /// Print a labelled line.
    pub fn print_line(&mut self, text: &str) {
        self.write_indent();
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Increase the indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indentation level.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }
}

impl Default for PolyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `row · x <= bound`.
///
/// Zero coefficients are skipped; a row with none left renders as `0`.
pub fn format_inequality<F: Scalar>(row: Row<'_, F>, bound: F) -> String {
    let terms: Vec<String> = row
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(j, c)| format!("{}x{}", c, j + 1))
        .collect();
    let lhs = if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    };
    format!("{} <= {}", lhs, bound)
}

/// Render a polyhedron with one inequality per line.
pub fn print_polyhedron<F: Scalar>(p: &Polyhedron<F>) -> String {
    let mut printer = PolyPrinter::new();
    printer.print_polyhedron(p);
    printer.take_output()
}

impl<F: Scalar> fmt::Display for Polyhedron<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (row, bound)) in self.a().iter_rows().zip(self.b().iter()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&format_inequality(row, *bound))?;
        }
        Ok(())
    }
}
