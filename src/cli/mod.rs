//! CLI module for Reggy
//!
//! Provides subcommands:
//! - `serve`: run the HTTP schema registry
//! - `resolve`: resolve a single schema and print it to stdout

pub mod resolve;
pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

/// Reggy - file-backed schema registry
#[derive(Parser)]
#[command(name = "reggy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP schema registry
    Serve(serve::ServeArgs),

    /// Resolve one schema and print its body
    Resolve(resolve::ResolveArgs),
}

/// Schema location overrides shared by all subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct SchemaArgs {
    /// Directory holding schema files (overrides config)
    #[arg(long)]
    pub schema_dir: Option<String>,

    /// Schema file extension without the dot (overrides config)
    #[arg(long)]
    pub schema_ext: Option<String>,

    /// Path template using {dir}, {name}, {version} and {ext} (overrides config)
    #[arg(long)]
    pub path_template: Option<String>,
}

impl SchemaArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.schema_dir {
            config.schemas.dir = dir.clone();
        }

        if let Some(ext) = &self.schema_ext {
            config.schemas.ext = ext.clone();
        }

        if let Some(template) = &self.path_template {
            config.schemas.path_template = template.clone();
        }
    }
}

/// Load layered configuration, falling back to defaults when none is present
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();

    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}
