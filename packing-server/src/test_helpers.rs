//! Test helpers for packing-server unit tests.

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;
use packing_core::InMemoryPackConfigRepository;
use packing_types::{AppConfig, PackConfig, StorageBackend};

use crate::router::build_router;
use crate::state::AppState;

/// Config for tests: in-memory store, default limits.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config
}

/// Create a minimal `AppState` backed by an empty in-memory store.
pub fn test_app_state() -> AppState {
    AppState::new(Arc::new(InMemoryPackConfigRepository::new()), test_config())
}

/// `AppState` whose store already holds `sizes` at `version`.
pub fn test_app_state_with_sizes(version: i64, sizes: &[i64]) -> AppState {
    let document = PackConfig { version, pack_sizes: sizes.to_vec(), updated_at: Utc::now() };
    AppState::new(Arc::new(InMemoryPackConfigRepository::with_config(document)), test_config())
}

/// Full router, including middleware, wrapped in a test server.
#[allow(clippy::expect_used, reason = "test setup failure should abort the test")]
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("failed to start test server")
}
