//! Unified editor error handling
//!
//! Error taxonomy of the zone editor:
//! - validation errors block a mode transition and carry every violation
//! - import errors leave the zone store untouched
//! - export errors cover every failure except an explicit user cancellation
//! - persistence errors carry the server message when one is available

use thiserror::Error;

/// Editor error enum
#[derive(Debug, Error)]
pub enum EditorError {
    /// Zone or settings validation failed
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Interchange document could not be parsed or contained no usable zones
    #[error("import failed: {message}")]
    Import { message: String },

    /// Export serialization or file write failed
    #[error("export failed: {message}")]
    Export { message: String },

    /// Settings API call failed
    #[error("persistence error: {message}")]
    Persistence { message: String },

    /// Operation referenced a zone or vertex that is no longer in the store
    #[error("stale zone reference")]
    StaleZone,
}

impl EditorError {
    // ========== Convenient constructors ==========

    /// Create an Import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import { message: message.into() }
    }

    /// Create an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    /// Create a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence { message: message.into() }
    }

    /// Violation reasons carried by a validation error, if any
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Validation(reasons) => reasons,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for EditorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Persistence { message: err.to_string() }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
