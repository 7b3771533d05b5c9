use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use packing_core::{PackConfigRepository, PackConfigService};
use packing_types::{PackConfig, PackingError};

pub async fn show_pack_sizes(repository: Arc<dyn PackConfigRepository>, json: bool) -> Result<()> {
    let current = PackConfigService::new(repository).current().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&current)?);
        return Ok(());
    }

    match current {
        Some(config) => print_config(&config),
        None => println!("{}", "Pack sizes are not configured.".yellow()),
    }
    Ok(())
}

/// Replace the stored sizes, re-reading and retrying on a lost race.
pub async fn set_pack_sizes(
    repository: Arc<dyn PackConfigRepository>,
    sizes: &[i64],
    retries: u32,
) -> Result<()> {
    let service = PackConfigService::new(repository);
    let config = replace_with_retries(&service, sizes, retries).await?;

    println!("{} Pack sizes updated", "✓".green());
    print_config(&config);
    Ok(())
}

/// The service makes one attempt per call; this loop is the retry policy.
pub(crate) async fn replace_with_retries(
    service: &PackConfigService,
    sizes: &[i64],
    retries: u32,
) -> Result<PackConfig, PackingError> {
    let mut attempt = 0;
    loop {
        match service.replace_pack_sizes(sizes).await {
            Err(err) if err.is_conflict() && attempt < retries => {
                attempt += 1;
                tracing::warn!(
                    attempt,
                    retries,
                    error = %err,
                    "Pack sizes changed concurrently, retrying"
                );
            },
            result => return result,
        }
    }
}

fn print_config(config: &PackConfig) {
    let sizes: Vec<String> = config.pack_sizes.iter().map(ToString::to_string).collect();
    println!("  Version:    {}", config.version.to_string().cyan());
    println!("  Pack sizes: {}", sizes.join(", ").bold());
    println!("  Updated:    {}", config.updated_at.to_rfc3339());
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use packing_core::{InMemoryPackConfigRepository, RepoResult, RepositoryError};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Loses the first `failures` writes, then behaves like the in-memory store.
    struct FlakyStore {
        inner: InMemoryPackConfigRepository,
        failures: AtomicU32,
    }

    #[async_trait]
    impl PackConfigRepository for FlakyStore {
        async fn get(&self) -> RepoResult<Option<PackConfig>> {
            self.inner.get().await
        }

        async fn create(&self, initial: &PackConfig) -> RepoResult<()> {
            self.inner.create(initial).await
        }

        async fn save_if_version(&self, next: &PackConfig, expected: i64) -> RepoResult<()> {
            let lost = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if lost {
                return Err(RepositoryError::VersionConflict { expected });
            }
            self.inner.save_if_version(next, expected).await
        }

        fn backend_name(&self) -> &'static str {
            "flaky"
        }
    }

    fn flaky(failures: u32) -> PackConfigService {
        let inner = InMemoryPackConfigRepository::with_config(
            PackConfig::new(&[250, 500]).unwrap_or_else(|e| panic!("{e}")),
        );
        PackConfigService::new(Arc::new(FlakyStore { inner, failures: AtomicU32::new(failures) }))
    }

    #[tokio::test]
    async fn test_without_retries_conflict_is_returned() {
        let service = flaky(1);

        let result = replace_with_retries(&service, &[1000], 0).await;

        assert_eq!(result, Err(PackingError::VersionConflict { expected: 0 }));
    }

    #[tokio::test]
    async fn test_retries_absorb_lost_races() {
        let service = flaky(2);

        let config = replace_with_retries(&service, &[1000], 2).await.unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(config.version, 1);
        assert_eq!(config.pack_sizes, vec![1000]);
    }

    #[tokio::test]
    async fn test_validation_errors_are_not_retried() {
        let service = flaky(0);

        let result = replace_with_retries(&service, &[0], 5).await;

        assert!(matches!(result, Err(PackingError::InvalidPackSizes { .. })));
    }
}
