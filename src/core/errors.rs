//! Shared error types for the analysis core.

use thiserror::Error;

/// Main error type for qualitrend operations.
///
/// Metric extraction, debt modeling, and scoring are total functions over
/// their input domain and never raise; only trend analysis and the trend
/// import/export surface can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Trend analysis requires a minimum number of usable data points.
    #[error("insufficient data for trend analysis: need {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Imported trend JSON parsed but is missing required top-level keys.
    #[error("invalid trend data format: {0}")]
    InvalidFormat(String),

    /// Imported trend data could not be parsed at all.
    #[error("failed to import trend data: {0}")]
    ImportFailure(String),

    /// Export was requested in a format outside the supported set.
    #[error("unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True when retrying the same call with a longer history could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::InsufficientData { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
