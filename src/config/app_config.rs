use serde::Deserialize;

use crate::domain::schema::DEFAULT_PATH_TEMPLATE;
use crate::domain::{DomainError, SchemaPathTemplate, ValidationPolicy};
use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub schemas: SchemaSettings,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where schema files live and how their paths are built
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub dir: String,
    pub ext: String,
    pub path_template: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ValidationConfig {
    #[serde(default)]
    pub policy: ValidationPolicy,
}

fn default_path_template() -> String {
    DEFAULT_PATH_TEMPLATE.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            dir: "schemas".to_string(),
            ext: "avsc".to_string(),
            path_template: default_path_template(),
        }
    }
}

impl SchemaSettings {
    pub fn path_template(&self) -> Result<SchemaPathTemplate, DomainError> {
        SchemaPathTemplate::new(&self.path_template, &self.dir, &self.ext)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
