use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::schemas;
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Schema registry
        .route("/schemas/{name}/{version}", get(schemas::get_schema))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    use super::*;
    use crate::api::types::ApiErrorResponse;
    use crate::domain::SchemaPathTemplate;
    use crate::infrastructure::cache::SchemaCache;
    use crate::infrastructure::schema::FileSchemaSource;
    use crate::infrastructure::services::SchemaService;

    const USER_SCHEMA: &str = "{\"type\":\"record\",\"name\":\"User\",\"fields\":[]}";
    const LATIN1_SCHEMA: &[u8] = b"{\"doc\":\"caf\xe9\"}";

    fn test_app() -> (Router, TempDir, Arc<SchemaService>) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("user")).unwrap();
        fs::write(dir.path().join("user/1.0.0.avsc"), USER_SCHEMA).unwrap();
        fs::write(dir.path().join("user").join(r"1.2\.3.avsc"), "legacy").unwrap();
        fs::create_dir_all(dir.path().join("latin")).unwrap();
        fs::write(dir.path().join("latin/1.avsc"), LATIN1_SCHEMA).unwrap();

        let template =
            SchemaPathTemplate::with_defaults(dir.path().to_string_lossy().to_string(), "avsc");
        let service = Arc::new(SchemaService::new(
            Arc::new(SchemaCache::new()),
            Arc::new(FileSchemaSource::new(template)),
        ));

        let app = create_router(AppState::new(service.clone()), None);
        (app, dir, service)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_schema_body_verbatim() {
        let (app, _dir, service) = test_app();

        let resp = app.oneshot(get("/schemas/user/1.0.0")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, USER_SCHEMA);

        let id = crate::domain::SchemaIdentifier::new("user", "1.0.0");
        assert!(service.cache().contains(&id).await);
    }

    #[tokio::test]
    async fn serves_percent_encoded_legacy_version() {
        let (app, _dir, _service) = test_app();

        let resp = app.oneshot(get("/schemas/user/1.2%5C.3")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "legacy");
    }

    #[tokio::test]
    async fn invalid_identifier_is_bad_request() {
        let (app, _dir, _service) = test_app();

        let resp = app
            .oneshot(get("/schemas/bad%20name!/not-a-version"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ApiErrorResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(error.error.message, "Schema name and/or version not valid");
    }

    #[tokio::test]
    async fn serves_non_utf8_schema_bytes_verbatim() {
        let (app, _dir, _service) = test_app();

        let resp = app.oneshot(get("/schemas/latin/1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[axum::http::header::CONTENT_TYPE],
            "application/octet-stream"
        );

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], LATIN1_SCHEMA);
    }

    #[tokio::test]
    async fn metrics_route_without_leading_slash_is_mounted() {
        let (_app, _dir, service) = test_app();
        let config = crate::infrastructure::observability::MetricsConfig {
            enabled: true,
            path: "metrics".to_string(),
        };
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let metrics = PrometheusMetrics::new(handle, &config);
        let app = create_router(AppState::new(service), Some(metrics));

        let resp = app.oneshot(get("/metrics")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_schema_is_not_found() {
        let (app, _dir, _service) = test_app();

        let resp = app.oneshot(get("/schemas/missing/1.0.0")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (app, _dir, _service) = test_app();

        let resp = app.oneshot(get("/schemas/user")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_and_readiness() {
        let (app, _dir, _service) = test_app();

        let resp = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.clone().oneshot(get("/live")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.oneshot(get("/ready")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("\"schema_source\""));
    }

    #[tokio::test]
    async fn readiness_fails_without_schema_dir() {
        let template = SchemaPathTemplate::with_defaults("/nonexistent/reggy/schemas", "avsc");
        let service = Arc::new(SchemaService::new(
            Arc::new(SchemaCache::new()),
            Arc::new(FileSchemaSource::new(template)),
        ));
        let app = create_router(AppState::new(service), None);

        let resp = app.oneshot(get("/ready")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
