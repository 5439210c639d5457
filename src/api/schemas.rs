//! Schema endpoint handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::SchemaBody;

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// GET /schemas/{name}/{version}
///
/// Returns the schema body verbatim as the response payload.
pub async fn get_schema(
    State(state): State<AppState>,
    Path((name, version)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    match state.schema_service.get_schema(&name, &version).await {
        Ok(body) => {
            info!(name = %name, version = %version, bytes = body.len(), "Served schema");
            let content_type = content_type_for(&body);
            Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
        }
        Err(e) => {
            warn!(name = %name, version = %version, error = %e, "Failed to serve schema");
            Err(ApiError::from(e))
        }
    }
}

/// Bodies are opaque; only label them as text when they decode as UTF-8
fn content_type_for(body: &SchemaBody) -> &'static str {
    if std::str::from_utf8(body).is_ok() {
        TEXT_CONTENT_TYPE
    } else {
        BINARY_CONTENT_TYPE
    }
}
