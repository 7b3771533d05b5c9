use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::middleware::{cors_layer, request_logger};
use crate::state::AppState;
use packing_core::prometheus;

pub fn build_router(state: AppState) -> Router {
    let server_config = state.config().server.clone();

    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .route("/metrics", get(metrics));

    Router::<AppState>::new()
        .nest("/api", api::router())
        .merge(public_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(server_config.body_limit_bytes))
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server_config.cors_origins))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "commit": option_env!("GIT_COMMIT").unwrap_or("unknown"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
            "storage": state.backend_name(),
            "uptime_secs": state.uptime_secs(),
        })),
    )
}

async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        prometheus::render_metrics(),
    )
}
