//! Path template for locating schema files

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::SchemaIdentifier;
use crate::domain::DomainError;

/// Default layout: `<dir>/<name>/<version>.<ext>`
pub const DEFAULT_PATH_TEMPLATE: &str = "{dir}/{name}/{version}.{ext}";

const REQUIRED_PLACEHOLDERS: [&str; 2] = ["{name}", "{version}"];

static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(dir|name|version|ext)\}").unwrap());

/// Renders schema file paths by plain placeholder substitution.
///
/// Supported placeholders are `{dir}`, `{name}`, `{version}` and `{ext}`.
/// Substitution happens in a single pass, so placeholder-like text inside a
/// name or version is copied as-is. Rendering never touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPathTemplate {
    template: String,
    dir: String,
    ext: String,
}

impl SchemaPathTemplate {
    pub fn new(
        template: impl Into<String>,
        dir: impl Into<String>,
        ext: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let template = template.into();

        for placeholder in REQUIRED_PLACEHOLDERS {
            if !template.contains(placeholder) {
                return Err(DomainError::configuration(format!(
                    "Schema path template '{}' is missing {}",
                    template, placeholder
                )));
            }
        }

        Ok(Self {
            template,
            dir: dir.into(),
            ext: ext.into(),
        })
    }

    /// Template with the default layout
    pub fn with_defaults(dir: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            template: DEFAULT_PATH_TEMPLATE.to_string(),
            dir: dir.into(),
            ext: ext.into(),
        }
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Deepest directory shared by every rendered path.
    ///
    /// Taken from the template text before the first `{name}` or `{version}`,
    /// with `{dir}` and `{ext}` filled in. An empty prefix means the working
    /// directory.
    pub fn root_dir(&self) -> PathBuf {
        let cut = REQUIRED_PLACEHOLDERS
            .iter()
            .filter_map(|p| self.template.find(p))
            .min()
            .unwrap_or(self.template.len());

        let prefix = self.template[..cut]
            .replace("{dir}", &self.dir)
            .replace("{ext}", &self.ext);

        if prefix.is_empty() {
            return PathBuf::from(".");
        }

        if prefix.ends_with('/') || prefix.ends_with(std::path::MAIN_SEPARATOR) {
            return PathBuf::from(prefix);
        }

        match PathBuf::from(&prefix).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn render(&self, id: &SchemaIdentifier) -> PathBuf {
        let rendered = PLACEHOLDER_PATTERN.replace_all(&self.template, |caps: &Captures| {
            match &caps[1] {
                "dir" => self.dir.clone(),
                "name" => id.name().to_string(),
                "version" => id.version().to_string(),
                _ => self.ext.clone(),
            }
        });

        PathBuf::from(rendered.as_ref())
    }
}
