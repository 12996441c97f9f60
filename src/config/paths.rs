//! Path management for keyhold
//!
//! Provides XDG-compliant path resolution for the local store.
//!
//! ## Path Resolution Order
//!
//! 1. `KEYHOLD_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/keyhold` or `~/.config/keyhold`
//! 3. Windows: `%APPDATA%\keyhold`

use std::path::PathBuf;

use crate::error::KeyholdError;

/// Manages all paths used by keyhold
#[derive(Debug, Clone)]
pub struct KeyholdPaths {
    /// Base directory for all keyhold data
    base_dir: PathBuf,
}

impl KeyholdPaths {
    /// Create a new KeyholdPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, KeyholdError> {
        let base_dir = if let Ok(custom) = std::env::var("KEYHOLD_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create KeyholdPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/keyhold/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/keyhold/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the salt slot (base64 text, unencrypted)
    ///
    /// Keyed independently from the envelope slot; written at most once.
    pub fn salt_file(&self) -> PathBuf {
        self.data_dir().join("salt.b64")
    }

    /// Get the path to the envelope slot (`{"iv": ..., "ct": ...}` JSON)
    pub fn envelope_file(&self) -> PathBuf {
        self.data_dir().join("envelope.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), KeyholdError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KeyholdError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| KeyholdError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, KeyholdError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("keyhold"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, KeyholdError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| KeyholdError::Storage("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("keyhold"))
}
