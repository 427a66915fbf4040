//! Prometheus metrics for health-chat-service.
//!
//! HTTP request metrics come from `service_core`'s middleware; this module adds
//! the provider-side series and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to set metrics handle: already initialized"
        ))
    })
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one generation call. `outcome` is `ok` or a provider error kind.
pub fn record_provider_call(model: &str, outcome: &str, latency: Duration) {
    let labels = [("model", model.to_string()), ("outcome", outcome.to_string())];
    counter!("genai_provider_calls_total", &labels).increment(1);
    histogram!("genai_provider_latency_seconds", &labels).record(latency.as_secs_f64());
}
