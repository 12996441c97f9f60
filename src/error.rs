//! Custom error types for keyhold
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for keyhold operations
#[derive(Error, Debug)]
pub enum KeyholdError {
    /// Authenticated decryption failed: wrong passphrase or tampered data.
    /// Always fails closed; no partial plaintext is ever returned.
    #[error("wrong passphrase or corrupted backup")]
    DecryptionFailed,

    /// Persisted or imported bytes are not a valid envelope.
    /// Same user-facing class as `DecryptionFailed`, but distinguishable
    /// internally as a parse error rather than an authentication error.
    #[error("corrupted backup: {0}")]
    MalformedEnvelope(String),

    /// A mutating or exporting operation was invoked without a held key.
    /// This is a caller contract violation, rejected before any
    /// cryptographic call is attempted.
    #[error("store is locked: {0}")]
    Locked(String),

    /// Export requested but no envelope has been persisted yet
    #[error("nothing saved yet: the store has no encrypted data")]
    EmptyStore,

    /// Unexpected failure inside an encryption primitive
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl KeyholdError {
    /// Create a "locked" error naming the rejected operation
    pub fn locked(operation: impl Into<String>) -> Self {
        Self::Locked(operation.into())
    }

    /// Create a "not found" error for secrets
    pub fn secret_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Secret",
            identifier: identifier.into(),
        }
    }

    /// Check if this failure means the passphrase was wrong or the
    /// stored/imported data is corrupt (the two are indistinguishable
    /// to the user by design)
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed | Self::MalformedEnvelope(_))
    }

    /// Check if this is a caller contract violation
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Locked(_) | Self::EmptyStore)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for KeyholdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KeyholdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for keyhold operations
pub type KeyholdResult<T> = Result<T, KeyholdError>;
