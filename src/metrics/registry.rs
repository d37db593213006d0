// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of translate requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("translate_requests_total", "Total number of translate requests"),
        &["method", "status_code", "result_code"],
        REGISTRY
    ).unwrap();

    /// Translate request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("translate_request_duration_seconds", "Translate request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // UPSTREAM METRICS
    // ============================================================================

    /// Total Google Translate calls
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total Google Translate calls"),
        &["outcome"], // outcome: success, rate_limited, unavailable, rejected, malformed
        REGISTRY
    ).unwrap();

    /// Google Translate call duration, retries included
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_duration_seconds", "Google Translate call duration")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // HANDLER METRICS
    // ============================================================================

    /// Requests rejected by the handler before reaching the upstream
    pub static ref REJECTIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("translate_rejections_total", "Requests rejected before the upstream call"),
        &["reason"], // reason: unauthorized, invalid, too_large
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        REQUESTS_TOTAL.with_label_values(&["GET", "200", "200"]).inc();
        UPSTREAM_CALLS.with_label_values(&["success"]).inc();
        REJECTIONS.with_label_values(&["invalid"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("translate_requests_total"));
        assert!(metrics.contains("upstream_calls_total"));
        assert!(metrics.contains("translate_rejections_total"));
    }
}
