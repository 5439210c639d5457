//! Resolve command - prints one schema body to stdout

use std::io::Write;

use clap::Args;

use super::{load_config, SchemaArgs};
use crate::infrastructure::logging;

/// Arguments for the resolve command
#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Schema name
    pub name: String,

    /// Schema version
    pub version: String,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

/// Resolve a schema through the same validation and loading path as the server
pub async fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let mut config = load_config();
    args.schema.apply(&mut config);

    let mut logging_config = logging::LoggingConfig::from(&config.logging);
    logging_config.stderr = true;
    logging::init_logging(&logging_config);

    let service = crate::create_schema_service(&config)?;
    let body = service.get_schema(&args.name, &args.version).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&body)?;
    stdout.flush()?;

    Ok(())
}
