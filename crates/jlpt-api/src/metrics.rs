//! Prometheus metrics for HTTP traffic and study activity.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jlpt_srs::Quality;
use metrics::{counter, describe_counter, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("numeric segment pattern is valid"));

/// Install the Prometheus recorder and return the handle used to render it.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()?;

    describe_counter!("http_requests_total", "HTTP requests by method, path and status");
    describe_histogram!("http_request_duration_seconds", "HTTP request latency");
    describe_counter!("srs_reviews_total", "Vocabulary reviews by quality and outcome");
    describe_counter!("quiz_submissions_total", "Graded quiz submissions by result");
    describe_counter!("auth_events_total", "Registrations and logins by result");

    Ok(handle)
}

/// Middleware recording request count, latency and in-flight requests.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!("http_requests_in_flight");
    in_flight.increment(1.0);

    let response = next.run(req).await;

    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Replace numeric ids with `:id` so paths stay low-cardinality.
fn normalize_path(path: &str) -> String {
    // Run twice: adjacent ids share the separating slash
    let once = NUMERIC_SEGMENT.replace_all(path, "/:id$1");
    NUMERIC_SEGMENT.replace_all(&once, "/:id$1").into_owned()
}

/// Handler for `GET /metrics`.
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

pub fn record_review_event(quality: Quality) {
    let outcome = if quality.is_success() { "success" } else { "failure" };

    counter!(
        "srs_reviews_total",
        "quality" => quality.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_quiz_submission(passed: bool) {
    counter!("quiz_submissions_total", "passed" => passed.to_string()).increment(1);
}

pub fn record_auth_event(event_type: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };

    counter!("auth_events_total", "type" => event_type, "status" => status).increment(1);
}
