//! Prometheus metrics recording.

use metrics::{counter, histogram};
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records one recommendation call with its strategy and outcome.
pub fn record_recommendation(strategy: &'static str, outcome: &'static str) {
    counter!(
        "recstack_recommendations_total",
        "strategy" => strategy,
        "outcome" => outcome
    )
    .increment(1);
}
