//! Schema identifier

use std::fmt;

use bytes::Bytes;

/// Verbatim schema file contents as opaque bytes, shared between the cache and callers
pub type SchemaBody = Bytes;

/// A schema addressed by name and version, taken verbatim from the request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaIdentifier {
    name: String,
    version: String,
}

impl SchemaIdentifier {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for SchemaIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
