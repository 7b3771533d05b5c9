//! Application State
//!
//! Holds the store handle and the services built on it, shared by every
//! request handler.

use std::sync::Arc;
use std::time::Instant;

use packing_core::{CalculateService, PackConfigRepository, PackConfigService};
use packing_types::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub repository: Arc<dyn PackConfigRepository>,
    pub calculate: CalculateService,
    pub pack_config: PackConfigService,
    pub config: AppConfig,
    pub started_at: Instant,
}

impl AppState {
    /// Wire services around an already opened repository.
    pub fn new(repository: Arc<dyn PackConfigRepository>, config: AppConfig) -> Self {
        let calculate = CalculateService::new(repository.clone(), &config.limits);
        let pack_config = PackConfigService::new(repository.clone());

        tracing::info!(
            backend = repository.backend_name(),
            max_amount = ?config.limits.max_amount,
            "Application state initialized"
        );

        Self {
            inner: Arc::new(AppStateInner {
                repository,
                calculate,
                pack_config,
                config,
                started_at: Instant::now(),
            }),
        }
    }

    pub fn calculate(&self) -> &CalculateService {
        &self.inner.calculate
    }

    pub fn pack_config(&self) -> &PackConfigService {
        &self.inner.pack_config
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.repository.backend_name()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}
