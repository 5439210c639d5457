//! Schema source implementations

mod file_source;

pub use file_source::FileSchemaSource;
