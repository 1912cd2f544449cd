//! Error taxonomy shared by every ffactory crate.

use std::fmt;

/// Broad class of a failure.
///
/// Every library error maps onto exactly one category. All categories are
/// recoverable: the caller fixes its input and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad kind, bad parameter type or range, locale mismatch.
    Validation,
    /// Duplicate column, unknown column reference, rename collision.
    SchemaConsistency,
    /// Sample size, interval or cluster count infeasible for the table.
    SamplingConstraint,
    /// Unsupported export format or invalid filesystem path.
    Serialization,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::SchemaConsistency => "schema consistency",
            Self::SamplingConstraint => "sampling constraint",
            Self::Serialization => "serialization",
        };
        f.write_str(name)
    }
}
