//! Schema domain - identifiers, validation rules and the source abstraction

mod identifier;
mod path;
mod source;
mod validation;

pub use identifier::{SchemaBody, SchemaIdentifier};
pub use path::{SchemaPathTemplate, DEFAULT_PATH_TEMPLATE};
pub use source::SchemaSource;
pub use validation::{
    is_valid_name, is_valid_version, IdentifierCheck, ValidationPolicy, INVALID_IDENTIFIER_MESSAGE,
};

#[cfg(test)]
pub use source::MockSchemaSource;
