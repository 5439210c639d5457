//! Infrastructure layer - Cache, file source, services and observability

pub mod cache;
pub mod logging;
pub mod observability;
pub mod schema;
pub mod services;
