//! Job, store and configuration errors.

use thiserror::Error;

/// Errors surfaced by job identity and persistence operations.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job could not be encoded (or decoded) as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The job has no ID yet, so it has no file name.
    #[error("Job has no ID; call create_id before persisting")]
    MissingId,

    /// Error from the persistence store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JobError {
    /// Whether this error is a store not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JobError::Store(StoreError::NotFound(_)))
    }
}

/// Persistence store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object with that name exists.
    #[error("Job file not found: {0}")]
    NotFound(String),

    /// The store refused access.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The stored object is not valid JSON.
    #[error("Invalid job data in {name}: {message}")]
    InvalidData { name: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Classify an IO error raised while touching `name`.
    pub fn from_io(err: std::io::Error, name: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            std::io::ErrorKind::PermissionDenied => StoreError::PermissionDenied(name.to_string()),
            _ => StoreError::Io(err),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
