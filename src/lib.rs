//! keyhold - Terminal-based encrypted secret manager
//!
//! This library provides the core functionality for keyhold: a local
//! name/value secret store, encrypted at rest, protected by a single user
//! passphrase.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management for the local store
//! - `error`: Custom error types
//! - `crypto`: Key derivation (PBKDF2-HMAC-SHA256) and envelope
//!   encryption (AES-256-GCM)
//! - `models`: The plaintext record collection
//! - `storage`: The salt and envelope slots, with atomic writes
//! - `session`: The unlock/lock lifecycle and caller-facing API
//! - `export`: Plaintext CSV export
//! - `cli`: Command handlers bridging clap to the session
//!
//! # Example
//!
//! ```rust,ignore
//! use keyhold::config::KeyholdPaths;
//! use keyhold::session::Session;
//! use keyhold::storage::Store;
//!
//! let store = Store::new(KeyholdPaths::new()?)?;
//! let mut session = Session::new(store);
//! session.unlock("correct-horse")?;
//! session.add_or_update("api_key", "sk-123")?;
//! session.lock();
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod storage;

pub use error::{KeyholdError, KeyholdResult};
pub use session::Session;
