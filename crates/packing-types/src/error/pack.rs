//! Pack calculation and pack-size configuration errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the optimizer and by the two services built on the
/// configuration store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PackingError {
    /// Requested amount is zero or negative
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Proposed pack sizes are empty, non-positive or contain duplicates
    #[error("pack sizes must be non-empty unique positive integers: {reason}")]
    InvalidPackSizes {
        /// Which rule the proposed set broke
        reason: String,
    },

    /// Requested amount exceeds the configured calculation limit
    #[error("amount {amount} exceeds the maximum of {limit}")]
    AmountTooLarge {
        /// Amount that was requested
        amount: i64,
        /// Largest amount the service accepts
        limit: i64,
    },

    /// No pack configuration exists yet, or it holds no sizes
    #[error("pack sizes are not configured")]
    PackSizesNotConfigured,

    /// Search window produced no reachable total
    #[error("could not calculate a pack breakdown")]
    CouldNotCalculate,

    /// Another writer created the configuration first
    #[error("pack sizes were created concurrently")]
    Conflict,

    /// Stored version no longer matches the version that was read
    #[error("pack sizes version conflict: expected version {expected}")]
    VersionConflict {
        /// Version the caller read before attempting the write
        expected: i64,
    },

    /// Persistence failure not covered by the variants above
    #[error("store error: {message}")]
    Store {
        /// Description of the underlying failure
        message: String,
    },
}

impl PackingError {
    /// Build an `InvalidPackSizes` error from any displayable reason.
    pub fn invalid_pack_sizes(reason: impl Into<String>) -> Self {
        Self::InvalidPackSizes { reason: reason.into() }
    }

    /// A concurrent writer won the race; re-reading and retrying may succeed.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict | Self::VersionConflict { .. })
    }

    /// Rejected from the request alone, before any store access.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount | Self::InvalidPackSizes { .. } | Self::AmountTooLarge { .. }
        )
    }

    /// Stable machine-readable code used in API error bodies and metrics labels.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidPackSizes { .. } => "INVALID_PACK_SIZES",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::PackSizesNotConfigured => "PACK_SIZES_NOT_CONFIGURED",
            Self::CouldNotCalculate => "COULD_NOT_CALCULATE",
            Self::Conflict => "PACK_SIZES_CONFLICT",
            Self::VersionConflict { .. } => "PACK_SIZES_VERSION_CONFLICT",
            Self::Store { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_conflict() {
        assert!(PackingError::Conflict.is_conflict());
        assert!(PackingError::VersionConflict { expected: 0 }.is_conflict());
        assert!(!PackingError::Store { message: "down".to_string() }.is_conflict());
    }

    #[test]
    fn test_validation_errors_are_not_conflicts() {
        let err = PackingError::invalid_pack_sizes("empty");
        assert!(err.is_validation());
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "INVALID_PACK_SIZES");
    }
}
