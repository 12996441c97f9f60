//! Salt slot persistence
//!
//! The key derivation salt is stored as base64 text, unencrypted (salts are
//! not secret), keyed independently from the envelope slot. It is created on
//! first use and never rotated for the life of the store.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::crypto::{generate_salt, SALT_SIZE};
use crate::error::KeyholdError;

use super::file_io::{read_text_optional, write_text_atomic};

/// Repository for the persisted key derivation salt
pub struct SaltSlot {
    path: PathBuf,
}

impl SaltSlot {
    /// Create a new salt slot
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Check whether a salt has been persisted
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted salt, if any
    pub fn load(&self) -> Result<Option<[u8; SALT_SIZE]>, KeyholdError> {
        let Some(text) = read_text_optional(&self.path)? else {
            return Ok(None);
        };

        let bytes = STANDARD.decode(text.trim()).map_err(|e| {
            KeyholdError::Storage(format!("Invalid salt encoding in {}: {}", self.path.display(), e))
        })?;

        let salt: [u8; SALT_SIZE] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            KeyholdError::Storage(format!(
                "Invalid salt size: expected {}, got {}",
                SALT_SIZE,
                bytes.len()
            ))
        })?;

        Ok(Some(salt))
    }

    /// Load the salt, generating and persisting a fresh one on first use
    ///
    /// This is the only write this slot ever performs under normal
    /// operation; subsequent calls return the stored value unchanged.
    pub fn load_or_create(&self) -> Result<[u8; SALT_SIZE], KeyholdError> {
        if let Some(salt) = self.load()? {
            return Ok(salt);
        }

        let salt = generate_salt();
        write_text_atomic(&self.path, &STANDARD.encode(salt))?;
        Ok(salt)
    }
}
