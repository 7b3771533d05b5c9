//! PostgreSQL implementation of the pack configuration repository.
//!
//! The document is the single row `id = 1` of `pack_configs`. Creation relies
//! on the primary key to detect a concurrent creator, and the version-gated
//! save is one `UPDATE ... WHERE version = $expected` statement, so the
//! compare and the write are atomic with respect to every other connection.

use async_trait::async_trait;
use packing_types::{PackConfig, StorageConfig};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::modules::pack_config_pg_helpers::{map_sqlx_err, row_to_pack_config, SINGLETON_ID};
use crate::modules::repository::{PackConfigRepository, RepoResult, RepositoryError};

/// PostgreSQL-backed pack configuration repository.
pub struct PostgresPackConfigRepository {
    /// Database connection pool.
    pool: PgPool,
}

impl PostgresPackConfigRepository {
    /// Create repository with existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Connect to database and create repository.
    ///
    /// Fails fast when the database cannot be reached within the configured
    /// acquire timeout.
    pub async fn connect(database_url: &str, config: &StorageConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(300))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn run_migrations(&self) -> RepoResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| RepositoryError::Database(err.to_string()))
    }
}

#[async_trait]
impl PackConfigRepository for PostgresPackConfigRepository {
    async fn get(&self) -> RepoResult<Option<PackConfig>> {
        let row = sqlx::query(
            r#"SELECT version, pack_sizes, updated_at
               FROM pack_configs
               WHERE id = $1"#,
        )
        .bind(SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to fetch pack config");
            map_sqlx_err(err)
        })?;

        row.as_ref().map(row_to_pack_config).transpose()
    }

    async fn create(&self, initial: &PackConfig) -> RepoResult<()> {
        let result = sqlx::query(
            r#"INSERT INTO pack_configs (id, version, pack_sizes, updated_at)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(SINGLETON_ID)
        .bind(initial.version)
        .bind(&initial.pack_sizes)
        .bind(initial.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create pack config");
            map_sqlx_err(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::AlreadyExists);
        }
        Ok(())
    }

    async fn save_if_version(&self, next: &PackConfig, expected_previous: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"UPDATE pack_configs
               SET version = $2, pack_sizes = $3, updated_at = $4
               WHERE id = $1 AND version = $5"#,
        )
        .bind(SINGLETON_ID)
        .bind(next.version)
        .bind(&next.pack_sizes)
        .bind(next.updated_at)
        .bind(expected_previous)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to update pack config");
            map_sqlx_err(err)
        })?;

        // No row matched: another writer advanced the version first.
        if result.rows_affected() == 0 {
            return Err(RepositoryError::VersionConflict { expected: expected_previous });
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
