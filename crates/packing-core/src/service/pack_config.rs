use std::sync::Arc;

use packing_types::{normalize_pack_sizes, PackConfig, PackingError};

use crate::modules::repository::{PackConfigRepository, RepositoryError};
use crate::prometheus;

/// Reads and replaces the stored pack sizes.
///
/// Writes are single optimistic attempts: a lost race is reported to the
/// caller and never retried here.
#[derive(Clone)]
pub struct PackConfigService {
    repo: Arc<dyn PackConfigRepository>,
}

impl PackConfigService {
    pub fn new(repo: Arc<dyn PackConfigRepository>) -> Self {
        Self { repo }
    }

    /// Current document, `None` before the first replacement.
    pub async fn current(&self) -> Result<Option<PackConfig>, PackingError> {
        let current = self.repo.get().await.map_err(|err| {
            tracing::error!(error = %err, "Failed to read pack configuration");
            PackingError::from(err)
        })?;
        if let Some(config) = &current {
            prometheus::update_version_gauge(config.version);
        }
        Ok(current)
    }

    /// Replace the stored sizes with `proposed`.
    ///
    /// `proposed` must be non-empty, positive and free of duplicates; it is
    /// stored in ascending order. Returns the document that was written.
    pub async fn replace_pack_sizes(&self, proposed: &[i64]) -> Result<PackConfig, PackingError> {
        let sizes = normalize_pack_sizes(proposed).inspect_err(|err| {
            tracing::debug!(error = %err, ?proposed, "Rejected pack sizes");
            prometheus::record_replacement("invalid");
        })?;

        let current = self.repo.get().await.map_err(|err| self.store_failure(err))?;

        let (next, outcome) = match current {
            None => {
                let initial = PackConfig::new(&sizes)?;
                self.repo.create(&initial).await.map_err(|err| self.store_failure(err))?;
                (initial, "created")
            },
            Some(current) => {
                let next = current.replaced(&sizes)?;
                self.repo
                    .save_if_version(&next, current.version)
                    .await
                    .map_err(|err| self.store_failure(err))?;
                (next, "replaced")
            },
        };

        tracing::info!(
            version = next.version,
            pack_sizes = ?next.pack_sizes,
            backend = self.repo.backend_name(),
            "Pack sizes {outcome}"
        );
        prometheus::record_replacement(outcome);
        prometheus::update_version_gauge(next.version);
        Ok(next)
    }

    /// Log and count a failed store call, then convert it.
    fn store_failure(&self, err: RepositoryError) -> PackingError {
        match &err {
            RepositoryError::AlreadyExists => {
                tracing::warn!("Pack configuration was created concurrently");
                prometheus::record_replacement("conflict");
            },
            RepositoryError::VersionConflict { expected } => {
                tracing::warn!(expected, "Pack configuration version moved on before the write");
                prometheus::record_replacement("conflict");
            },
            RepositoryError::Database(_) | RepositoryError::Serialization(_) => {
                tracing::error!(
                    error = %err,
                    backend = self.repo.backend_name(),
                    "Pack configuration store failed"
                );
                prometheus::record_replacement("error");
            },
        }
        err.into()
    }
}
