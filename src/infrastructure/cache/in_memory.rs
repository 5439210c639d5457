//! Two-level in-memory schema cache

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{SchemaBody, SchemaIdentifier};

/// Cached schema body, stored verbatim
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub body: SchemaBody,
}

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(SchemaBody),
    /// Neither the name nor the version was known
    MissName,
    /// The name is known but the version has not been loaded yet
    MissVersion,
}

type VersionMap = HashMap<String, CacheEntry>;

/// Thread-safe `name -> version -> body` cache.
///
/// Entries are only ever added: there is no eviction, no invalidation and an
/// existing slot is never overwritten. Per-name maps are created on the first
/// lookup for a name and kept even if the following load fails.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<String, VersionMap>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lookup(&self, id: &SchemaIdentifier) -> CacheLookup {
        let entries = self.entries.read().await;

        match entries.get(id.name()) {
            Some(versions) => match versions.get(id.version()) {
                Some(entry) => CacheLookup::Hit(entry.body.clone()),
                None => CacheLookup::MissVersion,
            },
            None => CacheLookup::MissName,
        }
    }

    /// Creates an empty version map for the name if none exists yet
    pub async fn ensure_name(&self, name: &str) {
        let mut entries = self.entries.write().await;

        if !entries.contains_key(name) {
            entries.insert(name.to_string(), VersionMap::new());
        }
    }

    /// Stores a body unless the slot is already filled; returns the stored body
    pub async fn insert(&self, id: &SchemaIdentifier, body: SchemaBody) -> SchemaBody {
        let mut entries = self.entries.write().await;

        entries
            .entry(id.name().to_string())
            .or_default()
            .entry(id.version().to_string())
            .or_insert(CacheEntry { body })
            .body
            .clone()
    }

    pub async fn contains(&self, id: &SchemaIdentifier) -> bool {
        matches!(self.lookup(id).await, CacheLookup::Hit(_))
    }

    pub async fn contains_name(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    /// Total number of cached bodies across all names
    pub async fn size(&self) -> usize {
        self.entries.read().await.values().map(HashMap::len).sum()
    }
}
