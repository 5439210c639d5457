//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::SchemaService;

/// Application state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub schema_service: Arc<SchemaService>,
}

impl AppState {
    pub fn new(schema_service: Arc<SchemaService>) -> Self {
        Self { schema_service }
    }
}
