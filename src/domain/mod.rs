//! Domain layer - Schema identifiers, validation and core errors

pub mod error;
pub mod schema;

pub use error::DomainError;
pub use schema::{
    is_valid_name, is_valid_version, IdentifierCheck, SchemaBody, SchemaIdentifier,
    SchemaPathTemplate, SchemaSource, ValidationPolicy,
};
