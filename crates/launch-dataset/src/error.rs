//! Error types for dataset loading
//!
//! Every variant of [`DataLoadError`] is fatal: a dashboard must refuse to
//! start rather than serve a partially loaded table.

use std::path::PathBuf;

/// Errors raised while loading or validating the launch table
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// Source file missing or unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to open or read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Required column absent from the header row
    #[error("missing required column: '{0}'")]
    MissingColumn(&'static str),

    /// Required cell empty in a data row
    #[error("row {row}: missing value for '{column}'")]
    MissingField {
        /// 1-based data row
        row: usize,
        /// Header of the empty cell
        column: &'static str,
    },

    /// Row could not be parsed (bad number, ragged row, bad encoding)
    #[error("row {row}: malformed record: {source}")]
    Malformed {
        /// 1-based data row
        row: usize,
        /// Parser error for the row
        #[source]
        source: csv::Error,
    },

    /// Payload mass negative or not finite
    #[error("row {row}: invalid payload mass {value}")]
    InvalidPayload {
        /// 1-based data row
        row: usize,
        /// Rejected payload value
        value: f64,
    },

    /// Outcome other than 0 or 1
    #[error("row {row}: invalid outcome {value}, expected 0 or 1")]
    InvalidOutcome {
        /// 1-based data row
        row: usize,
        /// Rejected outcome value
        value: f64,
    },

    /// Source has no data rows
    #[error("dataset contains no launch records")]
    Empty,
}

impl DataLoadError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Data row the error points at, if any
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MissingField { row, .. }
            | Self::Malformed { row, .. }
            | Self::InvalidPayload { row, .. }
            | Self::InvalidOutcome { row, .. } => Some(*row),
            Self::Io { .. } | Self::MissingColumn(_) | Self::Empty => None,
        }
    }
}

/// Errors from the process-wide store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `install` called more than once in this process
    #[error("dataset store already installed")]
    AlreadyInstalled,
}
