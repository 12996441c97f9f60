//! Store status command

use crate::error::KeyholdResult;
use crate::session::Session;

/// Show where the store lives and which slots are populated
///
/// Requires no passphrase; nothing sensitive is revealed.
pub fn handle_status_command(session: &Session) -> KeyholdResult<()> {
    let store = session.store();

    println!("Store directory: {}", store.paths().base_dir().display());
    println!(
        "Salt slot:       {}",
        if store.salt.exists() {
            "present"
        } else {
            "absent (created on first unlock)"
        }
    );
    println!(
        "Envelope slot:   {}",
        if store.envelope.exists() {
            "present (encrypted data saved)"
        } else {
            "absent (store is empty)"
        }
    );
    Ok(())
}
