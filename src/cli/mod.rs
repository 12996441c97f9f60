//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the session layer. Passphrase handling lives
//! here: the core never prompts and never sees an empty passphrase.

pub mod backup;
pub mod secrets;
pub mod status;

pub use backup::{handle_clear_command, handle_export_command, handle_import_command, ExportCommands};
pub use secrets::{handle_add_command, handle_get_command, handle_list_command, handle_remove_command};
pub use status::handle_status_command;

use crate::crypto::SecureString;
use crate::error::{KeyholdError, KeyholdResult};
use crate::session::Session;

/// Environment variable consulted before prompting for the passphrase
pub const PASSPHRASE_ENV: &str = "KEYHOLD_PASSPHRASE";

/// Obtain the passphrase from the environment or a hidden prompt
///
/// Empty passphrases are rejected here, before any key derivation.
pub(crate) fn obtain_passphrase() -> KeyholdResult<SecureString> {
    let passphrase = match std::env::var(PASSPHRASE_ENV) {
        Ok(value) => SecureString::new(value),
        Err(_) => {
            let entered = rpassword::prompt_password("Enter passphrase: ")
                .map_err(|e| KeyholdError::Io(format!("Failed to read passphrase: {}", e)))?;
            SecureString::new(entered)
        }
    };

    if passphrase.is_empty() {
        return Err(KeyholdError::Validation(
            "passphrase must not be empty".into(),
        ));
    }

    Ok(passphrase)
}

/// Unlock the session with a passphrase from the environment or a prompt
pub(crate) fn unlock_session(session: &mut Session) -> KeyholdResult<()> {
    let passphrase = obtain_passphrase()?;
    session.unlock(passphrase.as_str())?;
    Ok(())
}

/// Prompt for a secret value without echoing it
pub(crate) fn prompt_secret_value() -> KeyholdResult<String> {
    rpassword::prompt_password("Enter secret value: ")
        .map_err(|e| KeyholdError::Io(format!("Failed to read secret value: {}", e)))
}
