//! Error types for the flight delay pipeline.
//!
//! Only structural problems are errors. Cells that fail to parse are recovered
//! as absent values by the cleaner and never surface here.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort loading or exporting a dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more required columns are missing from the header row.
    ///
    /// No partial dataset is produced when this happens.
    #[error("Missing required column(s): {}", missing.join(", "))]
    Schema {
        /// Required column names not found in the input, in schema order
        missing: Vec<String>,
    },

    /// The input or output file could not be accessed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte stream is not readable as CSV (empty stream, ragged rows, ...).
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the schema check failing.
    pub fn is_schema(&self) -> bool {
        matches!(self, PipelineError::Schema { .. })
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
