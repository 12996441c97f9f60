//! Storage layer for keyhold
//!
//! Two independent keyed slots in the local data directory: the salt slot
//! (base64 text, unencrypted) and the envelope slot (encrypted JSON).
//! All writes are atomic (temp file + rename).

pub mod envelope;
pub mod file_io;
pub mod salt;

pub use envelope::EnvelopeSlot;
pub use file_io::{read_text_optional, write_text_atomic};
pub use salt::SaltSlot;

use crate::config::paths::KeyholdPaths;
use crate::error::KeyholdError;

/// Main storage coordinator that provides access to both slots
pub struct Store {
    paths: KeyholdPaths,
    pub salt: SaltSlot,
    pub envelope: EnvelopeSlot,
}

impl Store {
    /// Create a new Store instance
    pub fn new(paths: KeyholdPaths) -> Result<Self, KeyholdError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            salt: SaltSlot::new(paths.salt_file()),
            envelope: EnvelopeSlot::new(paths.envelope_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &KeyholdPaths {
        &self.paths
    }
}
