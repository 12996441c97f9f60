//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives encryption keys from user passphrases using PBKDF2 with a high
//! fixed iteration count and a per-store random salt.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the key derivation salt in bytes (128 bits)
pub const SALT_SIZE: usize = 16;

/// Fixed PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// A derived encryption key
///
/// Holds the 32-byte key for AES-256, zeroized on drop. The key never
/// leaves volatile memory and is only consumed by the envelope codec.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; 32],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

// Don't print key material in Debug output
impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an encryption key from a passphrase and salt
///
/// Deterministic: identical (passphrase, salt) inputs always yield the
/// identical key, which is the basis for passphrase verification — a wrong
/// passphrase surfaces downstream as a decryption authentication failure.
/// Never fails, for any string input; empty passphrases are rejected by the
/// caller, not here.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

/// Generate a fresh random salt
///
/// Called once per store; the storage layer persists the result and reuses
/// it for every subsequent derivation. Salts are not secret.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_length() {
        let salt = generate_salt();
        let key = derive_key("test_passphrase", &salt);
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        let salt = generate_salt();
        let key1 = derive_key("test_passphrase", &salt);
        let key2 = derive_key("test_passphrase", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = generate_salt();
        let key1 = derive_key("passphrase1", &salt);
        let key2 = derive_key("passphrase2", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let salt1 = generate_salt();
        let salt2 = generate_salt();
        let key1 = derive_key("same_passphrase", &salt1);
        let key2 = derive_key("same_passphrase", &salt2);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_does_not_panic() {
        // The unit itself accepts any string; emptiness is the caller's check
        let salt = generate_salt();
        let key = derive_key("", &salt);
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_debug_redacts_key() {
        let salt = generate_salt();
        let key = derive_key("secret", &salt);
        let debug = format!("{:?}", key);
        assert!(debug.contains("DerivedKey"));
        assert!(!debug.contains("secret"));
    }
}
