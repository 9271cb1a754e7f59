//! Metrics and observability utilities
//!
//! Provides Prometheus metric names and recording helpers
//! with standardized naming conventions.

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use std::time::Instant;

/// Metrics prefix for all ImpactRank metrics
pub const METRICS_PREFIX: &str = "impactrank";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Leaderboard metrics
    describe_counter!(
        format!("{}_leaderboard_computations_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of leaderboard computations"
    );

    describe_histogram!(
        format!("{}_leaderboard_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Leaderboard computation latency in seconds"
    );

    describe_gauge!(
        format!("{}_leaderboard_papers_ranked", METRICS_PREFIX),
        Unit::Count,
        "Number of papers in the last leaderboard"
    );

    describe_histogram!(
        format!("{}_leaderboard_iterations", METRICS_PREFIX),
        Unit::Count,
        "Power iterations run per leaderboard"
    );

    describe_counter!(
        format!("{}_leaderboard_edges_dropped_total", METRICS_PREFIX),
        Unit::Count,
        "Influence edges discarded during graph construction"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record one leaderboard computation
pub fn record_leaderboard(
    duration_secs: f64,
    policy: &str,
    papers_ranked: usize,
    iterations: usize,
    converged: bool,
) {
    counter!(
        format!("{}_leaderboard_computations_total", METRICS_PREFIX),
        "policy" => policy.to_string(),
        "converged" => converged.to_string()
    )
    .increment(1);

    histogram!(format!("{}_leaderboard_duration_seconds", METRICS_PREFIX))
        .record(duration_secs);

    histogram!(format!("{}_leaderboard_iterations", METRICS_PREFIX))
        .record(iterations as f64);

    gauge!(format!("{}_leaderboard_papers_ranked", METRICS_PREFIX))
        .set(papers_ranked as f64);
}

/// Helper to record discarded influence edges
pub fn record_dropped_edges(reason: &'static str, count: usize) {
    if count == 0 {
        return;
    }
    counter!(
        format!("{}_leaderboard_edges_dropped_total", METRICS_PREFIX),
        "reason" => reason
    )
    .increment(count as u64);
}
