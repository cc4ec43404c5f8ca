//! Error types for taskdeck
//!
//! Surfaces per kind:
//! - Validation: inline form feedback by the embedding UI
//! - NotFound: silent no-op or toast, caller's choice
//! - NoSession: redirect to login
//! - Persistence: failed mutation, nothing changed in memory

use thiserror::Error;

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("Invalid field: {0}")]
    Validation(String),

    // Missing-target errors
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    // Session errors
    #[error("No active session")]
    NoActiveSession,

    // Persistence failures
    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(std::path::PathBuf),
}

/// Coarse classification used by UI collaborators to pick a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    NoSession,
    Persistence,
}

impl Error {
    /// Get the classification for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,

            Error::TaskNotFound(_) | Error::NotificationNotFound(_) => ErrorKind::NotFound,

            Error::NoActiveSession => ErrorKind::NoSession,

            Error::Persistence(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;
