//! Session lifecycle and the caller-facing API
//!
//! A `Session` owns the derived key and the plaintext record collection —
//! the only shared mutable resources in the system. Every mutating
//! operation takes `&mut self`, so concurrent callers must serialize
//! through the session; the borrow checker enforces the single-actor rule
//! that the storage format depends on (each save fully replaces the
//! persisted envelope, so overlapping saves could let an older encryption
//! clobber a newer one).
//!
//! Locking clears the key and the plaintext together, never one without
//! the other.

use crate::crypto::{decrypt, derive_key, encrypt, DerivedKey, Envelope};
use crate::error::{KeyholdError, KeyholdResult};
use crate::models::RecordCollection;
use crate::storage::Store;

/// Whether a session currently holds a usable key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

/// An unlockable view over one persisted store
pub struct Session {
    store: Store,
    key: Option<DerivedKey>,
    records: RecordCollection,
}

impl Session {
    /// Create a locked session over a store
    pub fn new(store: Store) -> Self {
        Self {
            store,
            key: None,
            records: RecordCollection::new(),
        }
    }

    /// Current lock state
    pub fn state(&self) -> SessionState {
        if self.key.is_some() {
            SessionState::Unlocked
        } else {
            SessionState::Locked
        }
    }

    /// Check whether the session is unlocked
    pub fn is_unlocked(&self) -> bool {
        self.key.is_some()
    }

    /// Access the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Derive a key from the passphrase and load the record collection
    ///
    /// On first use for this store a fresh salt is generated and persisted;
    /// every later unlock reuses it. An absent envelope is an empty store,
    /// not an error. A wrong passphrase or corrupted envelope fails with
    /// `DecryptionFailed` and leaves the session state unchanged.
    pub fn unlock(&mut self, passphrase: &str) -> KeyholdResult<&RecordCollection> {
        let salt = self.store.salt.load_or_create()?;
        let key = derive_key(passphrase, &salt);

        let records = match self.store.envelope.load()? {
            Some(envelope) => decrypt_records(&envelope, &key)?,
            None => RecordCollection::new(),
        };

        self.key = Some(key);
        self.records = records;
        Ok(&self.records)
    }

    /// Discard the key and plaintext together
    ///
    /// Idempotent; locking a locked session is a no-op.
    pub fn lock(&mut self) {
        self.key = None;
        self.records = RecordCollection::new();
    }

    /// Access the decrypted records; requires an unlocked session
    pub fn records(&self) -> KeyholdResult<&RecordCollection> {
        if self.key.is_none() {
            return Err(KeyholdError::locked("read secrets"));
        }
        Ok(&self.records)
    }

    /// Insert or replace a secret and re-encrypt immediately
    ///
    /// Record names are unique; last write wins on collision.
    pub fn add_or_update(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> KeyholdResult<()> {
        if self.key.is_none() {
            return Err(KeyholdError::locked("add or update a secret"));
        }
        self.records.insert(name, value);
        self.persist()
    }

    /// Remove a secret and re-encrypt immediately
    ///
    /// Returns whether the name was present.
    pub fn remove(&mut self, name: &str) -> KeyholdResult<bool> {
        if self.key.is_none() {
            return Err(KeyholdError::locked("remove a secret"));
        }
        let removed = self.records.remove(name).is_some();
        self.persist()?;
        Ok(removed)
    }

    /// Hand out the persisted envelope's exact bytes
    ///
    /// No re-encryption or reformatting: what is on disk is what you get.
    pub fn export_envelope(&self) -> KeyholdResult<Vec<u8>> {
        if self.key.is_none() {
            return Err(KeyholdError::locked("export the encrypted backup"));
        }
        self.store.envelope.raw()?.ok_or(KeyholdError::EmptyStore)
    }

    /// Replace the persisted envelope with externally supplied bytes
    ///
    /// If a key is held the envelope is decrypted first, failing fast with
    /// `DecryptionFailed` on a passphrase mismatch and leaving the store
    /// untouched. With no key held the import is accepted unconditionally
    /// and verified at the next unlock. Either way the import fully
    /// replaces the existing envelope — no merge — and the bytes are
    /// persisted verbatim so a later export reproduces them exactly.
    pub fn import_envelope(&mut self, bytes: &[u8]) -> KeyholdResult<()> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            KeyholdError::MalformedEnvelope(format!("imported bytes are not UTF-8: {}", e))
        })?;
        let envelope = Envelope::from_json_slice(bytes)?;

        match &self.key {
            Some(key) => {
                let records = decrypt_records(&envelope, key)?;
                self.store.envelope.save_raw(text)?;
                self.records = records;
            }
            None => {
                self.store.envelope.save_raw(text)?;
            }
        }
        Ok(())
    }

    /// Delete the envelope slot and reset the in-memory records to empty
    ///
    /// The salt slot is retained. A held key survives, so an unlocked
    /// session continues over an empty store. Returns whether an envelope
    /// existed.
    pub fn clear_store(&mut self) -> KeyholdResult<bool> {
        let existed = self.store.envelope.delete()?;
        self.records = RecordCollection::new();
        Ok(existed)
    }

    /// Re-encrypt the collection under a fresh nonce and replace the slot
    fn persist(&self) -> KeyholdResult<()> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| KeyholdError::locked("save the store"))?;
        let plaintext = self.records.to_canonical_bytes()?;
        let envelope = encrypt(&plaintext, key)?;
        self.store.envelope.save(&envelope)
    }
}

/// Decrypt and parse an envelope into a record collection
///
/// Malformed-but-authentic plaintext should not occur under correct use;
/// it is treated as `DecryptionFailed`, never returned partially.
fn decrypt_records(envelope: &Envelope, key: &DerivedKey) -> KeyholdResult<RecordCollection> {
    let plaintext = decrypt(envelope, key)?;
    RecordCollection::from_canonical_slice(&plaintext).map_err(|_| KeyholdError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KeyholdPaths;
    use std::fs;
    use tempfile::TempDir;

    fn test_session() -> (TempDir, Session) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KeyholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = Session::new(Store::new(paths).unwrap());
        (temp_dir, session)
    }

    fn reopened_session(temp_dir: &TempDir) -> Session {
        let paths = KeyholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        Session::new(Store::new(paths).unwrap())
    }

    #[test]
    fn test_fresh_store_unlocks_empty() {
        let (_temp_dir, mut session) = test_session();

        let records = session.unlock("correct-horse").unwrap();
        assert!(records.is_empty());
        assert!(session.is_unlocked());
        // First derivation created the salt; the store is still empty
        assert!(session.store().salt.exists());
        assert!(!session.store().envelope.exists());
    }

    #[test]
    fn test_scenario_add_lock_unlock() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("correct-horse").unwrap();
        session.add_or_update("api_key", "sk-123").unwrap();
        assert!(session.store().envelope.exists());

        session.lock();
        assert_eq!(session.state(), SessionState::Locked);

        let records = session.unlock("correct-horse").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("api_key"), Some("sk-123"));
    }

    #[test]
    fn test_unicode_and_large_values_survive_relock() {
        let (_temp_dir, mut session) = test_session();
        let large_value = "x".repeat(50_000);

        session.unlock("correct-horse").unwrap();
        session.add_or_update("日本語", "パスワード ☃").unwrap();
        session.add_or_update("blob", large_value.clone()).unwrap();
        session.lock();

        let records = session.unlock("correct-horse").unwrap();
        assert_eq!(records.get("日本語"), Some("パスワード ☃"));
        assert_eq!(records.get("blob"), Some(large_value.as_str()));
    }

    #[test]
    fn test_wrong_passphrase_fails_closed() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("correct-horse").unwrap();
        session.add_or_update("api_key", "sk-123").unwrap();
        session.lock();

        let result = session.unlock("wrong-pass");
        assert!(matches!(result, Err(KeyholdError::DecryptionFailed)));
        // The failed unlock leaves the session locked
        assert!(!session.is_unlocked());
    }

    #[test]
    fn test_mutations_require_unlock() {
        let (_temp_dir, mut session) = test_session();

        assert!(matches!(
            session.add_or_update("a", "1"),
            Err(KeyholdError::Locked(_))
        ));
        assert!(matches!(session.remove("a"), Err(KeyholdError::Locked(_))));
        assert!(matches!(
            session.export_envelope(),
            Err(KeyholdError::Locked(_))
        ));
        assert!(matches!(session.records(), Err(KeyholdError::Locked(_))));
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let (temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("db_url", "postgres://localhost").unwrap();

        // A second session over the same directory sees the write
        let mut other = reopened_session(&temp_dir);
        let records = other.unlock("pass").unwrap();
        assert_eq!(records.get("db_url"), Some("postgres://localhost"));
    }

    #[test]
    fn test_remove_reports_presence() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();

        assert!(session.remove("a").unwrap());
        assert!(!session.remove("a").unwrap());
        assert!(session.records().unwrap().is_empty());
    }

    #[test]
    fn test_salt_written_at_most_once() {
        let (temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();
        let salt_path = temp_dir.path().join("data").join("salt.b64");
        let first = fs::read_to_string(&salt_path).unwrap();

        session.lock();
        session.unlock("pass").unwrap();
        session.lock();
        session.unlock("pass").unwrap();

        let second = fs::read_to_string(&salt_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_each_save_produces_fresh_envelope() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();
        let first = session.store().envelope.load().unwrap().unwrap();

        // Same collection re-saved: brand-new nonce and ciphertext
        session.add_or_update("a", "1").unwrap();
        let second = session.store().envelope.load().unwrap().unwrap();

        assert_ne!(first.iv, second.iv);
        assert_ne!(first.ct, second.ct);
    }

    #[test]
    fn test_export_requires_persisted_envelope() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        assert!(matches!(
            session.export_envelope(),
            Err(KeyholdError::EmptyStore)
        ));
    }

    #[test]
    fn test_export_is_exact_persisted_bytes() {
        let (temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();

        let exported = session.export_envelope().unwrap();
        let on_disk = fs::read(temp_dir.path().join("data").join("envelope.json")).unwrap();
        assert_eq!(exported, on_disk);
    }

    #[test]
    fn test_import_into_second_store() {
        // Scenario: export from store A, import into empty store B that
        // shares A's salt, both unlocked with the same passphrase
        let (dir_a, mut session_a) = test_session();
        session_a.unlock("shared-pass").unwrap();
        session_a.add_or_update("api_key", "sk-123").unwrap();
        session_a.add_or_update("db_url", "postgres://x").unwrap();
        let exported = session_a.export_envelope().unwrap();

        let (dir_b, mut session_b) = test_session();
        fs::create_dir_all(dir_b.path().join("data")).unwrap();
        fs::copy(
            dir_a.path().join("data").join("salt.b64"),
            dir_b.path().join("data").join("salt.b64"),
        )
        .unwrap();

        session_b.unlock("shared-pass").unwrap();
        session_b.import_envelope(&exported).unwrap();

        let records = session_b.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.get("api_key"), Some("sk-123"));
        assert_eq!(records.get("db_url"), Some("postgres://x"));
    }

    #[test]
    fn test_import_with_key_rejects_mismatch() {
        let (_dir_a, mut session_a) = test_session();
        session_a.unlock("passphrase-a").unwrap();
        session_a.add_or_update("theirs", "1").unwrap();
        let foreign = session_a.export_envelope().unwrap();

        let (_dir_b, mut session_b) = test_session();
        session_b.unlock("passphrase-b").unwrap();
        session_b.add_or_update("mine", "2").unwrap();
        let before = session_b.export_envelope().unwrap();

        // Different salt/passphrase: decryption check fails fast
        let result = session_b.import_envelope(&foreign);
        assert!(matches!(result, Err(KeyholdError::DecryptionFailed)));

        // The rejected import left store and memory untouched
        assert_eq!(session_b.export_envelope().unwrap(), before);
        assert_eq!(session_b.records().unwrap().get("mine"), Some("2"));
    }

    #[test]
    fn test_import_while_locked_is_unverified() {
        let (_dir_a, mut session_a) = test_session();
        session_a.unlock("passphrase-a").unwrap();
        session_a.add_or_update("theirs", "1").unwrap();
        let foreign = session_a.export_envelope().unwrap();

        // Accepted unconditionally while no key is held
        let (_dir_b, mut session_b) = test_session();
        session_b.import_envelope(&foreign).unwrap();
        assert!(session_b.store().envelope.exists());

        // Verification happens at the next unlock
        let result = session_b.unlock("some-other-pass");
        assert!(matches!(result, Err(KeyholdError::DecryptionFailed)));
    }

    #[test]
    fn test_import_rejects_malformed_bytes() {
        let (_temp_dir, mut session) = test_session();

        let result = session.import_envelope(b"definitely not an envelope");
        assert!(matches!(result, Err(KeyholdError::MalformedEnvelope(_))));
        assert!(!session.store().envelope.exists());
    }

    #[test]
    fn test_import_preserves_bytes_verbatim() {
        let (dir_a, mut session_a) = test_session();
        session_a.unlock("pass").unwrap();
        session_a.add_or_update("a", "1").unwrap();
        let envelope = session_a.store().envelope.load().unwrap().unwrap();

        // Re-format the export with unusual whitespace
        let text = format!(
            "{{ \"iv\" : \"{}\" , \"ct\" : \"{}\" }}",
            envelope.iv, envelope.ct
        );

        let (dir_b, mut session_b) = test_session();
        fs::create_dir_all(dir_b.path().join("data")).unwrap();
        fs::copy(
            dir_a.path().join("data").join("salt.b64"),
            dir_b.path().join("data").join("salt.b64"),
        )
        .unwrap();
        session_b.unlock("pass").unwrap();
        session_b.import_envelope(text.as_bytes()).unwrap();

        assert_eq!(session_b.export_envelope().unwrap(), text.as_bytes());
    }

    #[test]
    fn test_clear_store_keeps_salt_and_key() {
        let (temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();

        assert!(session.clear_store().unwrap());
        assert!(!session.store().envelope.exists());
        assert!(temp_dir.path().join("data").join("salt.b64").exists());
        assert!(session.records().unwrap().is_empty());

        // Still unlocked: adding works and re-creates the envelope
        session.add_or_update("b", "2").unwrap();
        assert!(session.store().envelope.exists());

        // Clearing an already-empty store reports nothing deleted
        session.clear_store().unwrap();
        assert!(!session.clear_store().unwrap());
    }

    #[test]
    fn test_lock_is_idempotent_and_clears_both() {
        let (_temp_dir, mut session) = test_session();

        session.unlock("pass").unwrap();
        session.add_or_update("a", "1").unwrap();

        session.lock();
        session.lock();
        assert_eq!(session.state(), SessionState::Locked);
        assert!(matches!(session.records(), Err(KeyholdError::Locked(_))));
    }
}
