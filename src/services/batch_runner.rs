//! Sequential batch import.
//!
//! Rows are processed strictly one after another. A failing row is reported
//! and skipped; only I/O errors on the report writer stop the batch.

use std::io::{self, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::Row;
use crate::domain::ports::IssueTracker;

use super::issue_creator::IssueCreator;

/// Result of one row, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowOutcome {
    Created { row: usize, key: String },
    Failed { row: usize, error: String },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            Self::Created { row, .. } | Self::Failed { row, .. } => *row,
        }
    }

    /// The progress line printed for this row.
    pub fn report_line(&self) -> String {
        match self {
            Self::Created { row, key } => format!("[{row}] Created {key}"),
            Self::Failed { row, error } => format!("[{row}] ERROR {error}"),
        }
    }
}

/// Totals for a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub created: usize,
    pub failed: usize,
    pub rows: Vec<RowOutcome>,
}

impl BatchSummary {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Created { .. } => self.created += 1,
            RowOutcome::Failed { .. } => self.failed += 1,
        }
        self.rows.push(outcome);
    }

    /// The closing line printed after the last row.
    pub fn report_line(&self) -> String {
        format!("Done. Created {} issues.", self.created)
    }
}

/// Print the detected header names, quoted so stray whitespace and BOM
/// remnants are visible.
pub fn report_headers<W: Write>(headers: &[String], out: &mut W) -> io::Result<()> {
    writeln!(out, "DEBUG: CSV headers detected:")?;
    for header in headers {
        writeln!(out, " - {header:?}")?;
    }
    Ok(())
}

/// Drives an [`IssueCreator`] over every row of an input.
#[derive(Debug)]
pub struct BatchRunner<T: IssueTracker> {
    creator: IssueCreator<T>,
}

impl<T: IssueTracker> BatchRunner<T> {
    pub fn new(creator: IssueCreator<T>) -> Self {
        Self { creator }
    }

    /// Create one issue per row, writing a progress line for each and the
    /// final count at the end.
    pub async fn run<I, W>(&self, rows: I, out: &mut W) -> io::Result<BatchSummary>
    where
        I: IntoIterator<Item = DomainResult<Row>>,
        W: Write,
    {
        let mut summary = BatchSummary::default();

        for (idx, row) in rows.into_iter().enumerate() {
            let position = idx + 1;
            let result = match row {
                Ok(row) => self.creator.create(&row).await,
                Err(e) => Err(e),
            };

            let outcome = match result {
                Ok(key) => {
                    info!(row = position, key = %key, "issue created");
                    RowOutcome::Created { row: position, key }
                }
                Err(e) => {
                    warn!(row = position, error = %e, "row failed");
                    RowOutcome::Failed {
                        row: position,
                        error: e.to_string(),
                    }
                }
            };

            writeln!(out, "{}", outcome.report_line())?;
            out.flush()?;
            summary.record(outcome);
        }

        writeln!(out)?;
        writeln!(out, "{}", summary.report_line())?;
        out.flush()?;

        info!(created = summary.created, failed = summary.failed, "batch finished");
        Ok(summary)
    }
}
