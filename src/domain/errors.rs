// ============================================================================
// Rank Errors
// Error types for rank parsing and generation
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Errors that can occur while parsing ranks or generating new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Decimal component failed to parse
    Numeric(NumericError),
    /// Serialized rank has no bucket separator
    MissingBucketSeparator,
    /// Bucket tag is not one of the three legal values
    UnknownBucket(String),
    /// `between` requires both ranks in the same bucket
    CrossBucket,
    /// No value exists strictly between equal bounds
    EmptyInterval,
    /// Decimal component outside the legal band, or no rank exists on that
    /// side of a global bound
    OutOfRange,
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankError::Numeric(err) => write!(f, "malformed decimal component: {}", err),
            RankError::MissingBucketSeparator => {
                write!(f, "serialized rank has no bucket separator")
            },
            RankError::UnknownBucket(tag) => write!(f, "unknown bucket tag {:?}", tag),
            RankError::CrossBucket => {
                write!(f, "ranks live in different buckets")
            },
            RankError::EmptyInterval => {
                write!(f, "no rank exists strictly between equal bounds")
            },
            RankError::OutOfRange => {
                write!(f, "rank outside the representable range")
            },
        }
    }
}

impl std::error::Error for RankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RankError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for RankError {
    fn from(err: NumericError) -> Self {
        RankError::Numeric(err)
    }
}

/// Result type alias for rank operations
pub type RankResult<T> = Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RankError::CrossBucket.to_string(),
            "ranks live in different buckets"
        );
        assert_eq!(
            RankError::UnknownBucket("9".to_string()).to_string(),
            "unknown bucket tag \"9\""
        );
    }

    #[test]
    fn test_numeric_errors_convert() {
        let err: RankError = NumericError::EmptyDigits.into();
        assert_eq!(err, RankError::Numeric(NumericError::EmptyDigits));
        assert!(std::error::Error::source(&err).is_some());
    }
}
