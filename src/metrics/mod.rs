// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, REGISTRY, REJECTIONS, REQUESTS_TOTAL, REQUEST_DURATION, UPSTREAM_CALLS,
    UPSTREAM_DURATION,
};

/// Helper to record translate request metrics
pub fn record_request(method: &str, status_code: u16, result_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, &status_code.to_string(), &result_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Helper to record an upstream call and its total duration
pub fn record_upstream_call(outcome: &str, duration_secs: f64) {
    UPSTREAM_CALLS.with_label_values(&[outcome]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Helper to record a request the handler refused
pub fn record_rejection(reason: &str) {
    REJECTIONS.with_label_values(&[reason]).inc();
}
