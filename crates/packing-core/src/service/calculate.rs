use std::sync::Arc;
use std::time::{Duration, Instant};

use packing_types::{LimitsConfig, PackBreakdown, PackingError};

use crate::modules::repository::PackConfigRepository;
use crate::optimizer::optimize;
use crate::prometheus;

/// Answers "which packs ship this amount" from the stored pack sizes.
#[derive(Clone)]
pub struct CalculateService {
    repo: Arc<dyn PackConfigRepository>,
    max_amount: Option<i64>,
}

impl CalculateService {
    pub fn new(repo: Arc<dyn PackConfigRepository>, limits: &LimitsConfig) -> Self {
        Self { repo, max_amount: limits.max_amount }
    }

    /// Breakdown for `amount` using the currently stored sizes.
    ///
    /// Amount checks run before the store is read, so rejected requests never
    /// cost a round-trip.
    pub async fn calculate(&self, amount: i64) -> Result<Vec<PackBreakdown>, PackingError> {
        self.check_amount(amount).inspect_err(|err| {
            prometheus::record_calculation(prometheus::error_outcome(err), Duration::ZERO);
        })?;

        let sizes = match self.repo.get().await {
            Ok(Some(config)) if !config.is_empty() => config.pack_sizes,
            Ok(_) => {
                prometheus::record_calculation("not_configured", Duration::ZERO);
                return Err(PackingError::PackSizesNotConfigured);
            },
            Err(err) => {
                tracing::error!(error = %err, "Failed to read pack configuration");
                prometheus::record_calculation("error", Duration::ZERO);
                return Err(err.into());
            },
        };

        self.run(amount, sizes).await
    }

    /// Breakdown for `amount` using caller-supplied sizes, without the store.
    pub async fn calculate_with_sizes(
        &self,
        amount: i64,
        sizes: &[i64],
    ) -> Result<Vec<PackBreakdown>, PackingError> {
        self.check_amount(amount)?;
        self.run(amount, sizes.to_vec()).await
    }

    const fn check_amount(&self, amount: i64) -> Result<(), PackingError> {
        if amount <= 0 {
            return Err(PackingError::InvalidAmount);
        }
        if let Some(limit) = self.max_amount {
            if amount > limit {
                return Err(PackingError::AmountTooLarge { amount, limit });
            }
        }
        Ok(())
    }

    /// Run the optimizer off the async executor; its cost is linear in `amount`.
    async fn run(&self, amount: i64, sizes: Vec<i64>) -> Result<Vec<PackBreakdown>, PackingError> {
        let started = Instant::now();
        let result = tokio::task::spawn_blocking(move || optimize(amount, &sizes))
            .await
            .unwrap_or_else(|join_err| {
                tracing::error!(error = %join_err, amount, "Optimizer task failed");
                Err(PackingError::CouldNotCalculate)
            });
        let elapsed = started.elapsed();

        match &result {
            Ok(breakdown) => {
                tracing::debug!(
                    amount,
                    packs = breakdown.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Calculated pack breakdown"
                );
                prometheus::record_calculation("ok", elapsed);
            },
            Err(PackingError::CouldNotCalculate) => {
                tracing::error!(amount, "Optimizer found no reachable total; invariant violated");
                prometheus::record_calculation("error", elapsed);
            },
            Err(err) => prometheus::record_calculation(prometheus::error_outcome(err), elapsed),
        }

        result
    }
}
