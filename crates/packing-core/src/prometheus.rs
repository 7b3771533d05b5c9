//! Prometheus metrics for the packing service.
//!
//! Exposes metrics compatible with Prometheus/OpenMetrics format:
//! - `packing_calculations_total{outcome}` - Counter of calculation requests
//! - `packing_calculation_duration_seconds` - Histogram of optimizer run time
//! - `packing_pack_size_replacements_total{outcome}` - Counter of configuration writes
//! - `packing_pack_sizes_version` - Gauge of the last observed document version
//! - `packing_uptime_seconds` - Gauge of server uptime
//!
//! Recording is a no-op until [`init_metrics`] installs the recorder, so
//! library callers and tests never need a global exporter.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use packing_types::PackingError;

/// Global Prometheus handle for rendering metrics
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Global server start time for uptime calculation
static METRICS_START_TIME: OnceLock<Instant> = OnceLock::new();

/// Histogram buckets for optimizer latency.
///
/// Small amounts finish in microseconds; the window grows linearly with the
/// amount, so the largest accepted amounts take a few hundred milliseconds.
const CALCULATION_LATENCY_BUCKETS: &[f64] = &[
    0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// Initialize Prometheus metrics recorder.
///
/// Must be called once at application startup before any metrics are
/// recorded. Subsequent calls return the existing handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let _ = METRICS_START_TIME.get_or_init(Instant::now);

    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(CALCULATION_LATENCY_BUCKETS)?
        .install_recorder()?;

    describe_counter!("packing_calculations_total", "Total number of pack calculations by outcome");
    describe_histogram!(
        "packing_calculation_duration_seconds",
        "Time spent computing a pack breakdown in seconds"
    );
    describe_counter!(
        "packing_pack_size_replacements_total",
        "Total pack size configuration writes by outcome"
    );
    describe_gauge!("packing_pack_sizes_version", "Last observed pack configuration version");
    describe_gauge!("packing_uptime_seconds", "Server uptime in seconds");

    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
/// Returns None if metrics have not been initialized.
pub fn get_prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Record one calculation attempt.
pub fn record_calculation(outcome: &'static str, duration: Duration) {
    counter!("packing_calculations_total", "outcome" => outcome).increment(1);
    histogram!("packing_calculation_duration_seconds").record(duration.as_secs_f64());
}

/// Record one pack size write attempt.
pub fn record_replacement(outcome: &'static str) {
    counter!("packing_pack_size_replacements_total", "outcome" => outcome).increment(1);
}

/// Track the version of the most recently read or written document.
pub fn update_version_gauge(version: i64) {
    gauge!("packing_pack_sizes_version").set(version as f64);
}

/// Update uptime gauge.
/// Should be called periodically or on metrics render.
pub fn update_uptime_gauge() {
    if let Some(start) = METRICS_START_TIME.get() {
        gauge!("packing_uptime_seconds").set(start.elapsed().as_secs_f64());
    }
}

/// Render all metrics in Prometheus text format.
pub fn render_metrics() -> String {
    update_uptime_gauge();

    if let Some(handle) = get_prometheus_handle() {
        handle.render()
    } else {
        String::from("# Metrics not initialized\n")
    }
}

/// Metric label for a failed operation.
pub const fn error_outcome(err: &PackingError) -> &'static str {
    if err.is_validation() {
        "invalid"
    } else if err.is_conflict() {
        "conflict"
    } else if matches!(err, PackingError::PackSizesNotConfigured) {
        "not_configured"
    } else {
        "error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_outcome_labels() {
        assert_eq!(error_outcome(&PackingError::InvalidAmount), "invalid");
        assert_eq!(error_outcome(&PackingError::PackSizesNotConfigured), "not_configured");
        assert_eq!(error_outcome(&PackingError::VersionConflict { expected: 1 }), "conflict");
        assert_eq!(error_outcome(&PackingError::Store { message: String::new() }), "error");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_calculation("ok", Duration::from_millis(1));
        record_replacement("replaced");
        update_version_gauge(3);
    }
}
