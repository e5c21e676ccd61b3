// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};

/// Total number of swap detail requests, labeled by operation and final status.
pub static SWAP_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "swap_api_requests_total",
        "Total number of swap detail requests, labeled by operation and status",
        &["operation", "status"]
    )
    .expect("Failed to create swap_api_requests_total counter vec")
});

/// Histogram for persistence call durations in seconds.
pub static STORE_CALL_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "swap_api_store_call_duration_seconds",
        "Persistence collaborator call durations in seconds",
        &["operation", "result"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to create store call duration histogram")
});

/// Count a handled swap detail request
///
/// # Arguments
/// * `operation` - The handler operation (create, read, update, delete)
/// * `status` - The HTTP status code the handler answered with
pub fn record_request(operation: &str, status: StatusCode) {
    SWAP_REQUESTS
        .with_label_values(&[operation, status.as_str()])
        .inc();
}

/// Observe the duration of a persistence call
pub fn observe_store_call(operation: &str, result: &str, duration_secs: f64) {
    STORE_CALL_DURATION
        .with_label_values(&[operation, result])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {err}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_counter_is_labelled() {
        let before = SWAP_REQUESTS.with_label_values(&["delete", "404"]).get();
        record_request("delete", StatusCode::NOT_FOUND);
        let after = SWAP_REQUESTS.with_label_values(&["delete", "404"]).get();
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn exports_text_format() {
        record_request("read", StatusCode::OK);
        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
