//! Reggy schema registry
//!
//! Resolves schemas addressed by `(name, version)` to the verbatim contents of
//! files on disk, caching every successfully loaded body in memory:
//! - Identifier validation before any I/O
//! - Two-level `name -> version -> body` read-through cache
//! - Configurable file layout (directory, extension, path template)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::DomainError;
use infrastructure::{cache::SchemaCache, schema::FileSchemaSource, services::SchemaService};
use tracing::info;

/// Build the schema service from configuration with a fresh, empty cache
pub fn create_schema_service(config: &AppConfig) -> Result<SchemaService, DomainError> {
    let template = config.schemas.path_template()?;

    let root = template.root_dir();

    let source = FileSchemaSource::new(template);
    let service = SchemaService::new(Arc::new(SchemaCache::new()), Arc::new(source))
        .with_policy(config.validation.policy);

    info!(
        root = %root.display(),
        template = %config.schemas.path_template,
        policy = ?service.policy(),
        "Configured schema service"
    );

    Ok(service)
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_schema_service(config)?;
    Ok(AppState::new(Arc::new(service)))
}

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}
