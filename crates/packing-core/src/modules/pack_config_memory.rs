//! In-memory implementation of the pack configuration repository.
//!
//! Used by `--storage memory` and as the deterministic store in tests. The
//! compare and the write of `save_if_version` happen under one lock.

use async_trait::async_trait;
use packing_types::PackConfig;
use parking_lot::Mutex;

use crate::modules::repository::{PackConfigRepository, RepoResult, RepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryPackConfigRepository {
    document: Mutex<Option<PackConfig>>,
}

impl InMemoryPackConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with an existing document.
    pub fn with_config(config: PackConfig) -> Self {
        Self { document: Mutex::new(Some(config)) }
    }
}

#[async_trait]
impl PackConfigRepository for InMemoryPackConfigRepository {
    async fn get(&self) -> RepoResult<Option<PackConfig>> {
        Ok(self.document.lock().clone())
    }

    async fn create(&self, initial: &PackConfig) -> RepoResult<()> {
        let mut document = self.document.lock();
        if document.is_some() {
            return Err(RepositoryError::AlreadyExists);
        }
        *document = Some(initial.clone());
        Ok(())
    }

    async fn save_if_version(&self, next: &PackConfig, expected_previous: i64) -> RepoResult<()> {
        let mut document = self.document.lock();
        match document.as_ref() {
            Some(current) if current.version == expected_previous => {
                *document = Some(next.clone());
                Ok(())
            },
            _ => Err(RepositoryError::VersionConflict { expected: expected_previous }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
