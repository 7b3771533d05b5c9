use axum::extract::State;
use serde::Deserialize;

use packing_types::PackBreakdown;

use super::error::{ApiError, ApiJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub amount: i64,
}

pub async fn calculate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CalculateRequest>,
) -> Result<ApiJson<Vec<PackBreakdown>>, ApiError> {
    let breakdown = state.calculate().calculate(request.amount).await?;
    Ok(ApiJson(breakdown))
}
