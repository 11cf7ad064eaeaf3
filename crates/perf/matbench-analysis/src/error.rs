//! Error types for the analysis pipeline.

use std::path::PathBuf;

/// Result alias used throughout the analysis crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures while reading the measurement table.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// The input file does not exist.
    #[error("input file {} not found", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The input exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A row is missing a required column or carries an invalid value.
    ///
    /// `row` is the 1-based data row (the header is row 0).
    #[error("malformed input at row {row}: {message}")]
    Malformed {
        /// 1-based data row.
        row: usize,
        /// What was wrong with it.
        message: String,
    },
}

/// Any failure that aborts the analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The measurement table is absent or malformed.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    /// No record carries the baseline label, so no speedup can be computed.
    #[error("baseline variant '{label}' not present in input")]
    MissingBaseline {
        /// The baseline label that was looked up.
        label: String,
    },
    /// The baseline's mean time is zero, so it cannot be a speedup denominator.
    #[error("baseline variant '{label}' has a mean time of zero")]
    ZeroBaselineTime {
        /// The baseline label.
        label: String,
    },
    /// A non-baseline variant's mean time is zero, so its speedup is undefined.
    #[error("variant '{variant}' has a mean time of zero; its speedup is undefined")]
    ZeroVariantTime {
        /// Label of the offending variant.
        variant: String,
    },
    /// A scaling-family record lacks its concurrency level.
    #[error("scaling record '{variant}' at row {row} has no thread count")]
    MalformedScalingRecord {
        /// Variant label of the offending record.
        variant: String,
        /// 1-based data row of the offending record.
        row: usize,
    },
}

impl AnalysisError {
    /// Returns `true` if the failure is the input file being absent.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::DataSource(DataSourceError::NotFound { .. }))
    }
}
