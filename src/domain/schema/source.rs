//! Schema source trait

use std::io;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{SchemaBody, SchemaIdentifier};

/// Backing store that schema bodies are read from on a cache miss
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Reads the full body for the identifier; errors are returned untouched
    async fn load(&self, id: &SchemaIdentifier) -> Result<SchemaBody, io::Error>;

    /// Checks that the store is reachable
    async fn check(&self) -> Result<(), io::Error>;

    /// Human-readable location, used in logs and readiness output
    fn location(&self) -> String;
}
