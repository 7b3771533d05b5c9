//! Request logging and CORS.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log one line per request and tag the response with a request id.
///
/// An incoming `x-request-id` is reused so ids can be followed across
/// proxies; otherwise a fresh UUID is assigned.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);

    let mut response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;
    if status >= 500 {
        tracing::error!(%request_id, %method, path, status, duration_ms, "request completed");
    } else {
        tracing::info!(%request_id, %method, path, status, duration_ms, "request completed");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

/// CORS layer allowing the configured browser origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}
