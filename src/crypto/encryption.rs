//! AES-256-GCM envelope encryption/decryption
//!
//! Provides authenticated encryption for the record collection at rest.
//! Each encryption operation generates a unique nonce; decryption fails
//! closed on any authentication failure.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use serde::{Deserialize, Serialize};

use crate::error::{KeyholdError, KeyholdResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// The persisted encryption envelope
///
/// One envelope exists per store: a fresh random nonce plus the
/// authenticated ciphertext (GCM tag included, not separately stored).
/// This is exactly the on-disk JSON shape: `{"iv": ..., "ct": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// The nonce used for this encryption (base64 encoded)
    pub iv: String,
    /// The ciphertext with trailing authentication tag (base64 encoded)
    pub ct: String,
}

impl Envelope {
    /// Create a new Envelope from raw bytes
    fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine};
        Self {
            iv: STANDARD.encode(nonce),
            ct: STANDARD.encode(ciphertext),
        }
    }

    /// Parse an envelope from JSON bytes
    ///
    /// Invalid shape is a `MalformedEnvelope`, never an unchecked panic.
    pub fn from_json_slice(bytes: &[u8]) -> KeyholdResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| KeyholdError::MalformedEnvelope(format!("invalid envelope JSON: {}", e)))
    }

    /// Serialize the envelope to its persisted JSON form
    pub fn to_json_string(&self) -> KeyholdResult<String> {
        serde_json::to_string(self)
            .map_err(|e| KeyholdError::Json(format!("Failed to serialize envelope: {}", e)))
    }

    /// Decode the nonce from base64
    fn decode_nonce(&self) -> KeyholdResult<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD
            .decode(&self.iv)
            .map_err(|e| KeyholdError::MalformedEnvelope(format!("invalid nonce encoding: {}", e)))
    }

    /// Decode the ciphertext from base64
    fn decode_ciphertext(&self) -> KeyholdResult<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.decode(&self.ct).map_err(|e| {
            KeyholdError::MalformedEnvelope(format!("invalid ciphertext encoding: {}", e))
        })
    }
}

/// Encrypt plaintext data using AES-256-GCM
///
/// Generates a random nonce for each encryption operation; nonces are never
/// reused with the same key.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> KeyholdResult<Envelope> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    // Generate random nonce
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Encrypt
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| KeyholdError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(Envelope::new(&nonce_bytes, &ciphertext))
}

/// Decrypt an envelope using AES-256-GCM
///
/// Fails closed: wrong key or tampered ciphertext yields `DecryptionFailed`
/// with no partial plaintext. Cryptographic failures are never transient,
/// so there are no retries.
pub fn decrypt(envelope: &Envelope, key: &DerivedKey) -> KeyholdResult<Vec<u8>> {
    let nonce_bytes = envelope.decode_nonce()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(KeyholdError::MalformedEnvelope(format!(
            "invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = envelope.decode_ciphertext()?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| KeyholdError::DecryptionFailed)?;

    Ok(plaintext)
}
