//! Cache infrastructure - In-memory schema cache

mod in_memory;

pub use in_memory::{CacheEntry, CacheLookup, SchemaCache};
