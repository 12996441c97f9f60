//! Cryptographic core for keyhold
//!
//! AES-256-GCM envelope encryption with PBKDF2-HMAC-SHA256 key derivation.
//! Everything else in the crate treats this module as the only place where
//! key material and ciphertext primitives live.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt, Envelope, NONCE_SIZE};
pub use key_derivation::{derive_key, generate_salt, DerivedKey, PBKDF2_ITERATIONS, SALT_SIZE};
pub use secure_memory::SecureString;
