//! Pack configuration document and pack breakdown models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::PackingError;

/// The single persisted pack configuration.
///
/// Created with version 0 and advanced by exactly one on every successful
/// replacement. The store owns the canonical copy; everything else works on
/// clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackConfig {
    /// Optimistic-concurrency version
    pub version: i64,
    /// Distinct positive pack sizes in ascending order
    pub pack_sizes: Vec<i64>,
    /// Time of the last successful write
    pub updated_at: DateTime<Utc>,
}

impl PackConfig {
    /// Build the initial (version 0) document from a proposed size set.
    pub fn new(sizes: &[i64]) -> Result<Self, PackingError> {
        Ok(Self { version: 0, pack_sizes: normalize_pack_sizes(sizes)?, updated_at: Utc::now() })
    }

    /// Build the successor of `self` holding `sizes`, one version ahead.
    ///
    /// `self` is left untouched so the caller still has the version it read
    /// for the compare-and-swap.
    pub fn replaced(&self, sizes: &[i64]) -> Result<Self, PackingError> {
        let version = self.version.checked_add(1).ok_or_else(|| PackingError::Store {
            message: format!("pack configuration version {} cannot advance", self.version),
        })?;
        Ok(Self {
            version,
            pack_sizes: normalize_pack_sizes(sizes)?,
            updated_at: Utc::now(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pack_sizes.is_empty()
    }
}

/// Validate a proposed size set and return it in canonical (ascending) order.
///
/// Rejects empty sets, non-positive sizes and duplicates.
pub fn normalize_pack_sizes(sizes: &[i64]) -> Result<Vec<i64>, PackingError> {
    if sizes.is_empty() {
        return Err(PackingError::invalid_pack_sizes("no pack sizes given"));
    }

    let mut seen = BTreeSet::new();
    for &size in sizes {
        if size <= 0 {
            return Err(PackingError::invalid_pack_sizes(format!(
                "pack size {size} is not positive"
            )));
        }
        if !seen.insert(size) {
            return Err(PackingError::invalid_pack_sizes(format!(
                "pack size {size} appears more than once"
            )));
        }
    }

    Ok(seen.into_iter().collect())
}

/// Number of packs of one size in a calculated breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PackBreakdown {
    pub size: i64,
    pub count: i64,
}

impl PackBreakdown {
    pub const fn new(size: i64, count: i64) -> Self {
        Self { size, count }
    }

    /// Units shipped by this line.
    pub const fn shipped(&self) -> i64 {
        self.size.saturating_mul(self.count)
    }
}

/// Total units shipped by a breakdown.
pub fn total_shipped(breakdown: &[PackBreakdown]) -> i64 {
    breakdown.iter().map(PackBreakdown::shipped).sum()
}

/// Total number of packs in a breakdown.
pub fn total_packs(breakdown: &[PackBreakdown]) -> i64 {
    breakdown.iter().map(|line| line.count).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pack_config_sorts_and_starts_at_zero() {
        let cfg = PackConfig::new(&[53, 23, 31]).unwrap();

        assert_eq!(cfg.version, 0);
        assert_eq!(cfg.pack_sizes, vec![23, 31, 53]);
    }

    #[test]
    fn test_replaced_bumps_version_without_mutating_source() {
        let cfg = PackConfig::new(&[250, 500]).unwrap();

        let next = cfg.replaced(&[1000, 500, 250]).unwrap();

        assert_eq!(next.version, 1);
        assert_eq!(next.pack_sizes, vec![250, 500, 1000]);
        assert_eq!(cfg.version, 0);
        assert_eq!(cfg.pack_sizes, vec![250, 500]);
    }

    #[test]
    fn test_replaced_refuses_to_reuse_the_last_version() {
        let mut cfg = PackConfig::new(&[250]).unwrap();
        cfg.version = i64::MAX;

        assert!(matches!(cfg.replaced(&[500]), Err(PackingError::Store { .. })));
    }

    #[test]
    fn test_validation_rejects_empty_duplicates_and_non_positive() {
        assert!(matches!(PackConfig::new(&[]), Err(PackingError::InvalidPackSizes { .. })));

        let cfg = PackConfig::new(&[1]).unwrap();
        assert!(matches!(cfg.replaced(&[1, 1]), Err(PackingError::InvalidPackSizes { .. })));
        assert!(matches!(cfg.replaced(&[5, 0]), Err(PackingError::InvalidPackSizes { .. })));
        assert!(matches!(cfg.replaced(&[-3]), Err(PackingError::InvalidPackSizes { .. })));
    }

    #[test]
    fn test_normalizing_a_normalized_set_is_identity() {
        let sizes = vec![250, 500, 1000, 2000, 5000];
        assert_eq!(normalize_pack_sizes(&sizes).unwrap(), sizes);
    }

    #[test]
    fn test_breakdown_totals() {
        let breakdown =
            [PackBreakdown::new(5000, 2), PackBreakdown::new(2000, 1), PackBreakdown::new(250, 1)];

        assert_eq!(total_shipped(&breakdown), 12_250);
        assert_eq!(total_packs(&breakdown), 4);
    }
}
