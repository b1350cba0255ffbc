//! Batch processing of polyhedra read from text.
//!
//! Input is a sequence of blank-line separated blocks. Each block holds a
//! polyhedron followed by zero or more projection directions:
//!
//! ```text
//! -1x1 <= 0
//! -1x2 <= 0
//! 1x1 + 1x2 <= 4
//! [ 1 0 ]
//! ```
//!
//! For every block the driver reports the system, whether it is empty and
//! its projection along each direction. A block that fails to parse or whose
//! emptiness test fails is logged and skipped; the remaining blocks are
//! still processed. A direction that cannot be projected along is reported
//! in place of its projection and does not affect the rest of the block.

use crate::frontend::{Block, BlockReader};
use crate::linalg::{Scalar, Vector};
use crate::polyhedral::{EliminationConfig, Polyhedron};
use crate::utils::errors::PolyResult;
use crate::utils::location::SourceLocation;
use crate::utils::poly_print::PolyPrinter;
use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Output format for batch reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per block
    Json,
}

/// Batch driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Report format
    pub format: OutputFormat,
    /// Limits for the emptiness test
    pub elimination: EliminationConfig,
    /// Run the emptiness test on each polyhedron
    pub check_emptiness: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            elimination: EliminationConfig::default(),
            check_emptiness: true,
        }
    }
}

impl BatchConfig {
    /// Set the report format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Limit the size of intermediate systems in the emptiness test.
    pub fn with_max_rows(mut self, limit: usize) -> Self {
        self.elimination = self.elimination.with_max_rows(limit);
        self
    }

    /// Enable or disable the emptiness test.
    pub fn with_emptiness(mut self, enable: bool) -> Self {
        self.check_emptiness = enable;
        self
    }
}

/// Counts from a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Blocks read
    pub processed: usize,
    /// Blocks that failed
    pub failed: usize,
    /// Projections that failed inside otherwise reported blocks
    pub failed_projections: usize,
}

impl BatchSummary {
    /// Blocks that produced a report.
    pub fn succeeded(&self) -> usize {
        self.processed - self.failed
    }

    /// Check if every block and every projection succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.failed_projections == 0
    }
}

/// Result of projecting along one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[serde(bound(serialize = "F: Scalar + Serialize"))]
pub enum ProjectionOutcome<F> {
    /// The projected system
    Polyhedron(Polyhedron<F>),
    /// Why the projection failed
    Error(String),
}

/// Projection of a block's polyhedron along one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "F: Scalar + Serialize"))]
pub struct ProjectionReport<F> {
    /// The direction projected along
    pub direction: Vector<F>,
    /// The projected system or the error
    #[serde(flatten)]
    pub outcome: ProjectionOutcome<F>,
}

impl<F> ProjectionReport<F> {
    /// The projected system, if the projection succeeded.
    pub fn polyhedron(&self) -> Option<&Polyhedron<F>> {
        match &self.outcome {
            ProjectionOutcome::Polyhedron(p) => Some(p),
            ProjectionOutcome::Error(_) => None,
        }
    }

    /// Check if the projection failed.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ProjectionOutcome::Error(_))
    }
}

/// Everything computed for one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "F: Scalar + Serialize"))]
pub struct BlockReport<F> {
    /// Line number where the block starts
    pub line: usize,
    /// Number of inequalities
    pub rows: usize,
    /// Number of dimensions
    pub cols: usize,
    /// The parsed system
    pub polyhedron: Polyhedron<F>,
    /// Emptiness verdict, absent when the test is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    /// One entry per direction line
    pub projections: Vec<ProjectionReport<F>>,
}

impl<F: Scalar> BlockReport<F> {
    /// Number of directions that could not be projected along.
    pub fn failed_projections(&self) -> usize {
        self.projections.iter().filter(|p| p.is_error()).count()
    }

    /// Render the report as text.
    pub fn to_text(&self) -> String {
        let mut printer = PolyPrinter::new();
        printer.print_line(&format!("(P) {} x {}", self.rows, self.cols));
        printer.print_polyhedron(&self.polyhedron);
        if let Some(empty) = self.empty {
            printer.print_line(&format!("P empty? {}", if empty { "yes" } else { "no" }));
        }
        for projection in &self.projections {
            printer.print_line(&format!("projection along {}:", projection.direction));
            printer.indent();
            match &projection.outcome {
                ProjectionOutcome::Polyhedron(p) => printer.print_polyhedron(p),
                ProjectionOutcome::Error(message) => {
                    printer.print_line(&format!("error: {}", message))
                }
            }
            printer.dedent();
        }
        printer.take_output()
    }
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<SourceLocation>,
    error: &'a str,
}

/// Compute the report for one block.
pub fn process_block<F: Scalar>(block: &Block, config: &BatchConfig) -> PolyResult<BlockReport<F>> {
    let polyhedron: Polyhedron<F> = block.polyhedron()?;
    let directions: Vec<Vector<F>> = block.directions()?;
    debug!(
        "block at line {}: {} x {} system, {} directions",
        block.first_line(),
        polyhedron.constraints(),
        polyhedron.dimensions(),
        directions.len()
    );

    let empty = if config.check_emptiness {
        Some(polyhedron.check_emptiness(&config.elimination)?)
    } else {
        None
    };

    let mut projections = Vec::with_capacity(directions.len());
    for direction in directions {
        let outcome = match polyhedron.project(&direction) {
            Ok(projected) => ProjectionOutcome::Polyhedron(projected),
            Err(e) => {
                error!(
                    "block at line {}: projection along {} failed: {}",
                    block.first_line(),
                    direction,
                    e
                );
                ProjectionOutcome::Error(e.to_string())
            }
        };
        projections.push(ProjectionReport { direction, outcome });
    }

    Ok(BlockReport {
        line: block.first_line(),
        rows: polyhedron.constraints(),
        cols: polyhedron.dimensions(),
        polyhedron,
        empty,
        projections,
    })
}

/// Process every block of `input`, writing reports to `output`.
///
/// Per-block failures are logged and counted; only I/O and encoding
/// failures abort the run.
pub fn run_batch<F, R, W>(input: R, output: &mut W, config: &BatchConfig) -> Result<BatchSummary>
where
    F: Scalar + Serialize,
    R: BufRead,
    W: Write,
{
    let mut reader = BlockReader::new(input);
    let mut summary = BatchSummary::default();

    while let Some(block) = reader
        .next_block()
        .with_context(|| format!("Failed to read input after line {}", reader.lines_read()))?
    {
        summary.processed += 1;
        let line = block.first_line();
        match process_block::<F>(&block, config) {
            Ok(report) => {
                summary.failed_projections += report.failed_projections();
                write_report(output, &report, config.format)?;
            }
            Err(e) => {
                summary.failed += 1;
                error!("block at line {}: {}", line, e);
                if config.format == OutputFormat::Json {
                    let message = e.to_string();
                    let json = serde_json::to_string(&ErrorReport {
                        line,
                        location: e.location(),
                        error: &message,
                    })
                    .context("Failed to encode error report")?;
                    writeln!(output, "{}", json).context("Failed to write output")?;
                }
            }
        }
    }

    info!(
        "processed {} blocks ({} failed, {} failed projections)",
        summary.processed, summary.failed, summary.failed_projections
    );
    Ok(summary)
}

fn write_report<F, W>(output: &mut W, report: &BlockReport<F>, format: OutputFormat) -> Result<()>
where
    F: Scalar + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Text => {
            writeln!(output, "{}", report.to_text()).context("Failed to write output")?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(report).context("Failed to encode report")?;
            writeln!(output, "{}", json).context("Failed to write output")?;
        }
    }
    Ok(())
}
