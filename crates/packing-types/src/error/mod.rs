//! Typed error definitions for the packing service.
//!
//! - [`PackingError`] covers every failure of the calculation and
//!   configuration flows. Conflicts are kept structurally apart from generic
//!   store failures so callers can map them to different outward signals.
//! - [`ConfigError`] covers loading and validating process configuration.

mod config;
mod pack;

pub use config::ConfigError;
pub use pack::PackingError;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = PackingError::VersionConflict { expected: 2 };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("VersionConflict"));
        assert!(json.contains('2'));

        let deserialized: PackingError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = PackingError::AmountTooLarge { amount: 1_000_001, limit: 1_000_000 };

        let msg = format!("{}", err);
        assert!(msg.contains("1000001"));
        assert!(msg.contains("1000000"));
    }
}
