//! Filesystem-backed schema source

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{SchemaBody, SchemaIdentifier, SchemaPathTemplate, SchemaSource};

/// Reads schema bodies from files laid out by a [`SchemaPathTemplate`]
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    template: SchemaPathTemplate,
}

impl FileSchemaSource {
    pub fn new(template: SchemaPathTemplate) -> Self {
        Self { template }
    }

    pub fn path_for(&self, id: &SchemaIdentifier) -> PathBuf {
        self.template.render(id)
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    async fn load(&self, id: &SchemaIdentifier) -> Result<SchemaBody, io::Error> {
        let path = self.path_for(id);
        debug!(path = %path.display(), schema = %id, "Reading schema file");

        let body = tokio::fs::read(&path).await?;
        Ok(SchemaBody::from(body))
    }

    async fn check(&self) -> Result<(), io::Error> {
        let root = self.template.root_dir();
        let metadata = tokio::fs::metadata(&root).await?;

        if !metadata.is_dir() {
            return Err(io::Error::other(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.template.root_dir().display().to_string()
    }
}
