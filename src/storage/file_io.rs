//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::KeyholdError;

/// Read a file's contents, returning `None` if it doesn't exist
pub fn read_text_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>, KeyholdError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| KeyholdError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write text to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified
/// at all, preventing corruption on crashes or power failures.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), KeyholdError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KeyholdError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| KeyholdError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| KeyholdError::Storage(format!("Failed to write data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| KeyholdError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        KeyholdError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Delete a file if it exists, reporting whether anything was removed
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, KeyholdError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)
        .map_err(|e| KeyholdError::Storage(format!("Failed to remove {}: {}", path.display(), e)))?;
    Ok(true)
}
