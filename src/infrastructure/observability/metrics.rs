//! Prometheus metrics infrastructure

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    pub fn new(handle: PrometheusHandle, config: &MetricsConfig) -> Self {
        Self {
            handle: Arc::new(handle),
            path: config.route_path(),
        }
    }

    /// Get the metrics as a string for the metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_default_metrics();

            let metrics = PrometheusMetrics::new(handle, config);
            tracing::info!("Prometheus metrics initialized at {}", metrics.path());

            Some(metrics)
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

fn register_default_metrics() {
    gauge!("reggy_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path().to_string();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric; `route` must be a route template, not a raw path
pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record a schema cache lookup
pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("schema_cache_hits_total").increment(1);
    } else {
        counter!("schema_cache_misses_total").increment(1);
    }
}

/// Record a rejected schema identifier
pub fn record_validation_failure() {
    counter!("schema_validation_failures_total").increment(1);
}

/// Record a failed schema read, labelled by I/O error kind
pub fn record_load_failure(kind: io::ErrorKind) {
    counter!("schema_load_errors_total", "kind" => format!("{:?}", kind)).increment(1);
}
