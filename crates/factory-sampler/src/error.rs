//! Error types for sampling operations.

use factory_core::ErrorCategory;

/// Error type for sampling operations.
///
/// Every variant is raised before any row is drawn.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    /// Sample size is zero
    #[error("Sample size must be a positive integer, got {0}")]
    InvalidSampleSize(usize),

    /// More rows requested than the table can supply
    #[error("Sample size {requested} exceeds the number of available rows ({available})")]
    SampleSizeExceedsPopulation { requested: usize, available: usize },

    /// Column is not part of the table
    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    /// Interval is zero
    #[error("Interval must be a positive integer, got {0}")]
    InvalidInterval(usize),

    /// Interval does not fit in the table
    #[error("Interval {interval} is too large for a table of {rows} rows")]
    IntervalExceedsPopulation { interval: usize, rows: usize },

    /// More clusters requested than distinct groups exist
    #[error("Number of clusters requested ({requested}) exceeds number of available groups ({available})")]
    ClusterCountExceedsAvailable { requested: usize, available: usize },

    /// Nothing to draw from
    #[error("Cannot sample from an empty table")]
    EmptyTable,
}

impl SamplingError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSampleSize(_) | Self::InvalidInterval(_) => ErrorCategory::Validation,
            Self::UnknownColumn(_) => ErrorCategory::SchemaConsistency,
            _ => ErrorCategory::SamplingConstraint,
        }
    }
}
