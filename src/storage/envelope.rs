//! Envelope slot persistence
//!
//! The encrypted record collection is stored as a single JSON object
//! `{"iv": ..., "ct": ...}`. Every save fully replaces the previous
//! envelope; there are no partial updates.

use std::path::PathBuf;

use crate::crypto::Envelope;
use crate::error::KeyholdError;

use super::file_io::{read_text_optional, remove_if_exists, write_text_atomic};

/// Repository for the persisted envelope
pub struct EnvelopeSlot {
    path: PathBuf,
}

impl EnvelopeSlot {
    /// Create a new envelope slot
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Check whether an envelope has been persisted
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the persisted envelope, if any
    ///
    /// An unparseable slot is a `MalformedEnvelope`, never a panic.
    pub fn load(&self) -> Result<Option<Envelope>, KeyholdError> {
        let Some(text) = read_text_optional(&self.path)? else {
            return Ok(None);
        };

        Envelope::from_json_slice(text.as_bytes()).map(Some)
    }

    /// Read the exact persisted bytes, if any
    ///
    /// Export hands these out verbatim; no re-encryption or reformatting.
    pub fn raw(&self) -> Result<Option<Vec<u8>>, KeyholdError> {
        Ok(read_text_optional(&self.path)?.map(String::into_bytes))
    }

    /// Persist an envelope, replacing whatever was stored before
    pub fn save(&self, envelope: &Envelope) -> Result<(), KeyholdError> {
        write_text_atomic(&self.path, &envelope.to_json_string()?)
    }

    /// Persist externally supplied envelope text verbatim
    ///
    /// The caller must have validated the shape first; storing the original
    /// bytes untouched keeps a later export byte-identical to the import.
    pub fn save_raw(&self, text: &str) -> Result<(), KeyholdError> {
        write_text_atomic(&self.path, text)
    }

    /// Delete the persisted envelope, reporting whether one existed
    pub fn delete(&self) -> Result<bool, KeyholdError> {
        remove_if_exists(&self.path)
    }
}
