use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use packing_types::PackConfig;

use super::error::{ApiError, ApiJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReplacePackSizesRequest {
    pub pack_sizes: Vec<i64>,
}

/// Stored pack sizes; `version` and `updated_at` are null before the first write.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackSizesResponse {
    pub version: Option<i64>,
    pub pack_sizes: Vec<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Option<PackConfig>> for PackSizesResponse {
    fn from(config: Option<PackConfig>) -> Self {
        match config {
            Some(config) => Self {
                version: Some(config.version),
                pack_sizes: config.pack_sizes,
                updated_at: Some(config.updated_at),
            },
            None => Self { version: None, pack_sizes: Vec::new(), updated_at: None },
        }
    }
}

pub async fn get_pack_sizes(
    State(state): State<AppState>,
) -> Result<ApiJson<PackSizesResponse>, ApiError> {
    let current = state.pack_config().current().await?;
    Ok(ApiJson(current.into()))
}

pub async fn replace_pack_sizes(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReplacePackSizesRequest>,
) -> Result<ApiJson<PackSizesResponse>, ApiError> {
    let next = state.pack_config().replace_pack_sizes(&request.pack_sizes).await?;
    Ok(ApiJson(Some(next).into()))
}
