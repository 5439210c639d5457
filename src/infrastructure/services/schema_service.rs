//! Schema service - validated, cached schema resolution

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::schema::INVALID_IDENTIFIER_MESSAGE;
use crate::domain::{
    DomainError, IdentifierCheck, SchemaBody, SchemaIdentifier, SchemaSource, ValidationPolicy,
};
use crate::infrastructure::cache::{CacheLookup, SchemaCache};
use crate::infrastructure::observability::{
    record_cache_lookup, record_load_failure, record_validation_failure,
};

/// Resolves schemas by name and version through a read-through cache
pub struct SchemaService {
    cache: Arc<SchemaCache>,
    source: Arc<dyn SchemaSource>,
    policy: ValidationPolicy,
}

impl std::fmt::Debug for SchemaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaService")
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SchemaService {
    pub fn new(cache: Arc<SchemaCache>, source: Arc<dyn SchemaSource>) -> Self {
        Self {
            cache,
            source,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn cache(&self) -> &Arc<SchemaCache> {
        &self.cache
    }

    pub fn source(&self) -> &Arc<dyn SchemaSource> {
        &self.source
    }

    /// Get a schema body, loading it from the source on a cache miss.
    ///
    /// NOTE: with the default policy a request is only rejected when both the
    /// name and the version are invalid, so a malformed name with a valid
    /// version still reaches the source. See `domain::schema::validation`.
    pub async fn get_schema(&self, name: &str, version: &str) -> Result<SchemaBody, DomainError> {
        let check = IdentifierCheck::run(name, version);

        if check.rejects(self.policy) {
            debug!(
                name = %name,
                version = %version,
                name_valid = check.name_valid,
                version_valid = check.version_valid,
                "Rejecting schema identifier"
            );
            record_validation_failure();
            return Err(DomainError::validation(INVALID_IDENTIFIER_MESSAGE));
        }

        let id = SchemaIdentifier::new(name, version);

        match self.cache.lookup(&id).await {
            CacheLookup::Hit(body) => {
                debug!(schema = %id, "Cache hit for schema");
                record_cache_lookup(true);
                return Ok(body);
            }
            CacheLookup::MissName => {
                self.cache.ensure_name(id.name()).await;
            }
            CacheLookup::MissVersion => {}
        }

        debug!(schema = %id, "Cache miss, loading schema");
        record_cache_lookup(false);

        let body = self.load_schema(&id).await?;
        Ok(self.cache.insert(&id, body).await)
    }

    /// Read a schema straight from the source, bypassing the cache
    pub async fn load_schema(&self, id: &SchemaIdentifier) -> Result<SchemaBody, DomainError> {
        match self.source.load(id).await {
            Ok(body) => {
                info!(schema = %id, bytes = body.len(), "Loaded schema");
                Ok(body)
            }
            Err(e) => {
                warn!(schema = %id, error = %e, "Failed to load schema");
                record_load_failure(e.kind());
                Err(DomainError::Load(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use mockall::predicate::always;
    use tempfile::tempdir;

    use super::*;
    use crate::domain::schema::MockSchemaSource;
    use crate::domain::SchemaPathTemplate;
    use crate::infrastructure::schema::FileSchemaSource;

    fn service_with(source: MockSchemaSource) -> SchemaService {
        SchemaService::new(Arc::new(SchemaCache::new()), Arc::new(source))
    }

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .withf(|id| id.name() == "user" && id.version() == r"1.0\.0")
            .times(1)
            .returning(|_| Ok(SchemaBody::from("{\"type\":\"record\"}")));

        let service = service_with(source);

        let first = service.get_schema("user", r"1.0\.0").await.unwrap();
        let second = service.get_schema("user", r"1.0\.0").await.unwrap();

        assert_eq!(first, "{\"type\":\"record\"}");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_name_with_valid_version_still_loads() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .withf(|id| id.name() == "bad/name!")
            .times(1)
            .returning(|_| Err(not_found()));

        let service = service_with(source);
        let err = service.get_schema("bad/name!", r"1.2\.3").await.unwrap_err();

        assert!(matches!(err, DomainError::Load(_)));
    }

    #[tokio::test]
    async fn test_valid_name_with_invalid_version_still_loads() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|_| Ok(SchemaBody::from("body")));

        let service = service_with(source);
        let body = service.get_schema("validname", "not-a-version").await.unwrap();

        assert_eq!(body, "body");
    }

    #[tokio::test]
    async fn test_plain_triple_with_invalid_name_is_rejected() {
        // "1.2.3" fails the legacy version pattern, so both checks fail here
        let mut source = MockSchemaSource::new();
        source.expect_load().never();

        let service = service_with(source);
        let err = service.get_schema("bad/name!", "1.2.3").await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_both_invalid_is_rejected_without_io() {
        let mut source = MockSchemaSource::new();
        source.expect_load().never();

        let service = service_with(source);
        let err = service.get_schema("bad name!", "not-a-version").await.unwrap_err();

        assert_eq!(err.to_string(), INVALID_IDENTIFIER_MESSAGE);
        assert!(!service.cache().contains_name("bad name!").await);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_single_failure() {
        let mut source = MockSchemaSource::new();
        source.expect_load().never();

        let service = service_with(source).with_policy(ValidationPolicy::RejectWhenEitherInvalid);
        let err = service.get_schema("bad/name!", r"1.2\.3").await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_missing_schema_is_not_cached() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .with(always())
            .times(2)
            .returning(|_| Err(not_found()));

        let service = service_with(source);

        for _ in 0..2 {
            let err = service.get_schema("missing", "1.0.0").await.unwrap_err();
            assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        }

        let id = SchemaIdentifier::new("missing", "1.0.0");
        assert!(!service.cache().contains(&id).await);
        assert!(service.cache().contains_name("missing").await);
    }

    #[tokio::test]
    async fn test_load_error_is_passed_through() {
        let mut source = MockSchemaSource::new();
        source.expect_load().times(1).returning(|_| {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ))
        });

        let service = service_with(source);
        let err = service.get_schema("locked", "1.0.0").await.unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "Permission denied");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_share_one_cache_entry() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .times(1..=8)
            .returning(|_| Ok(SchemaBody::from("{\"type\":\"record\"}")));

        let service = Arc::new(service_with(source));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_schema("user", r"1.0\.0").await })
            })
            .collect();

        for handle in handles {
            let body = handle.await.unwrap().unwrap();
            assert_eq!(body, "{\"type\":\"record\"}");
        }

        assert_eq!(service.cache().size().await, 1);
        let again = service.get_schema("user", r"1.0\.0").await.unwrap();
        assert_eq!(again, "{\"type\":\"record\"}");
    }

    #[tokio::test]
    async fn test_different_versions_load_separately() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .times(2)
            .returning(|id| Ok(SchemaBody::from(format!("schema {}", id.version()))));

        let service = service_with(source);

        let v1 = service.get_schema("user", "1").await.unwrap();
        let v2 = service.get_schema("user", "2").await.unwrap();
        let v1_again = service.get_schema("user", "1").await.unwrap();

        assert_eq!(v1, "schema 1");
        assert_eq!(v2, "schema 2");
        assert_eq!(v1, v1_again);
        assert_eq!(service.cache().size().await, 2);
    }

    #[tokio::test]
    async fn test_round_trip_from_disk() {
        let dir = tempdir().unwrap();
        let body = "{\"type\":\"record\",\"name\":\"Order\",\"fields\":[]}\r\n\ttrailing ";
        fs::create_dir_all(dir.path().join("order")).unwrap();
        fs::write(dir.path().join("order").join(r"2.0\.1.avsc"), body).unwrap();

        let template =
            SchemaPathTemplate::with_defaults(dir.path().to_string_lossy().to_string(), "avsc");
        let service = SchemaService::new(
            Arc::new(SchemaCache::new()),
            Arc::new(FileSchemaSource::new(template)),
        );

        let loaded = service.get_schema("order", r"2.0\.1").await.unwrap();
        assert_eq!(&loaded[..], body.as_bytes());

        // Cached bodies are not refreshed from disk
        fs::write(dir.path().join("order").join(r"2.0\.1.avsc"), "changed").unwrap();
        let cached = service.get_schema("order", r"2.0\.1").await.unwrap();
        assert_eq!(cached, body);
    }
}
