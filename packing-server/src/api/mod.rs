//! API Routes
//!
//! Versioned REST endpoints for the web UI and programmatic clients.

mod calculate;
pub(crate) mod error;
mod pack_sizes;


use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/calculate", post(calculate::calculate))
        .route(
            "/v1/pack-sizes",
            get(pack_sizes::get_pack_sizes).put(pack_sizes::replace_pack_sizes),
        )
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> ApiError {
    ApiError::not_found()
}
