//! Export functionality
//!
//! Two surfaces: the encrypted backup (the persisted envelope's exact
//! bytes, produced by the session) and the plaintext CSV below.

pub mod csv;

pub use csv::write_records_csv;

/// Suggested filename for encrypted backups
pub const BACKUP_FILENAME: &str = "keyhold_backup_encrypted.json";

/// Suggested filename for plaintext CSV exports
pub const CSV_FILENAME: &str = "keyhold_secrets.csv";
