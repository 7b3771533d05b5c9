//! Helper functions for PostgreSQL pack configuration operations.

use chrono::{DateTime, Utc};
use packing_types::PackConfig;
use sqlx::Row;

use crate::modules::repository::{RepoResult, RepositoryError};

/// Primary key of the only row in `pack_configs`.
pub(crate) const SINGLETON_ID: i16 = 1;

/// Convert a PostgreSQL row to a PackConfig struct.
pub(crate) fn row_to_pack_config(row: &sqlx::postgres::PgRow) -> RepoResult<PackConfig> {
    let version: i64 = row.try_get("version").map_err(map_decode_err)?;
    let pack_sizes: Vec<i64> = row.try_get("pack_sizes").map_err(map_decode_err)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(map_decode_err)?;

    Ok(PackConfig { version, pack_sizes, updated_at })
}

/// Map sqlx error to repository error.
pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}

fn map_decode_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Serialization(err.to_string())
}
