//! Pack configuration repository trait for storage abstraction.
//!
//! The store holds exactly one versioned document. Writers never update it in
//! place: they either create it (when absent) or swap it for a successor whose
//! version is one higher, gated on the version they read. At most one writer
//! wins each version transition; the others observe a conflict.

use async_trait::async_trait;
use packing_types::{PackConfig, PackingError};

pub type RepoResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Pack configuration already exists")]
    AlreadyExists,
    #[error("Pack configuration version conflict: expected {expected}")]
    VersionConflict { expected: i64 },
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<RepositoryError> for PackingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => Self::Conflict,
            RepositoryError::VersionConflict { expected } => Self::VersionConflict { expected },
            RepositoryError::Database(message) | RepositoryError::Serialization(message) => {
                Self::Store { message }
            },
        }
    }
}

#[async_trait]
pub trait PackConfigRepository: Send + Sync {
    /// Consistent snapshot of the document, or `None` before the first write.
    async fn get(&self) -> RepoResult<Option<PackConfig>>;

    /// Insert the initial document.
    ///
    /// Fails with [`RepositoryError::AlreadyExists`] when another writer
    /// created it first; an existing document is never overwritten.
    async fn create(&self, initial: &PackConfig) -> RepoResult<()>;

    /// Replace the document with `next` only if the stored version still
    /// equals `expected_previous`.
    ///
    /// The comparison and the write are one atomic step. On mismatch the
    /// document is left untouched and [`RepositoryError::VersionConflict`]
    /// is returned.
    async fn save_if_version(&self, next: &PackConfig, expected_previous: i64) -> RepoResult<()>;

    /// Short backend name for logs and status output.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_stay_distinct_from_store_failures() {
        let created: PackingError = RepositoryError::AlreadyExists.into();
        let stale: PackingError = RepositoryError::VersionConflict { expected: 4 }.into();
        let down: PackingError = RepositoryError::Database("connection refused".into()).into();

        assert_eq!(created, PackingError::Conflict);
        assert_eq!(stale, PackingError::VersionConflict { expected: 4 });
        assert!(created.is_conflict() && stale.is_conflict());
        assert!(!down.is_conflict());
        assert!(matches!(down, PackingError::Store { .. }));
    }
}
