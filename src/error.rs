//! # Error Types
//!
//! Structured error handling for the primary category core using thiserror.
//!
//! Resolution itself never fails: every failure on the permalink path is
//! degraded to a best-effort substitute (see [`crate::resolution`]). These
//! types surface only from configuration loading, storage encoding, and from
//! host collaborators reporting problems that the core then logs and absorbs.

use crate::config::ConfigurationError;
use thiserror::Error;

/// Crate-level error type
#[derive(Error, Debug)]
pub enum PermalinkError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Accessor error: {0}")]
    Accessor(#[from] AccessorError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PermalinkError>;

/// Failure reported by a host-supplied collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessorError {
    #[error("{operation} unavailable: {message}")]
    Unavailable { operation: String, message: String },

    #[error("Invalid family: {family}")]
    InvalidFamily { family: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl AccessorError {
    pub fn unavailable(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_family(family: impl Into<String>) -> Self {
        Self::InvalidFamily {
            family: family.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

pub type AccessorResult<T> = std::result::Result<T, AccessorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_error_display() {
        let err = AccessorError::unavailable("assigned_values", "store offline");
        assert_eq!(err.to_string(), "assigned_values unavailable: store offline");

        let err = AccessorError::invalid_family("genre");
        assert_eq!(err.to_string(), "Invalid family: genre");
    }

    #[test]
    fn test_permalink_error_from_accessor() {
        let err: PermalinkError = AccessorError::backend("timeout").into();
        assert!(matches!(err, PermalinkError::Accessor(_)));
        assert_eq!(err.to_string(), "Accessor error: Backend error: timeout");
    }
}
