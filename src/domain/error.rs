use std::io;

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Identifier rejected before any cache or disk access
    #[error("{message}")]
    Validation { message: String },

    /// Backing file could not be read; the I/O error is passed through untouched
    #[error(transparent)]
    Load(#[from] io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the underlying I/O error kind for load failures
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Load(err) => Some(err.kind()),
            _ => None,
        }
    }
}
