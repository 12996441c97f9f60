//! CLI commands for managing secrets
//!
//! Add, read, list, and remove operations. Each command unlocks the
//! session first and persists before returning.

use crate::error::{KeyholdError, KeyholdResult};
use crate::session::Session;

use super::{prompt_secret_value, unlock_session};

/// Mask shown in place of secret values unless reveal is requested
const VALUE_MASK: &str = "••••••••";

/// Add or update a secret
pub fn handle_add_command(
    session: &mut Session,
    name: &str,
    value: Option<String>,
) -> KeyholdResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(KeyholdError::Validation(
            "secret name must not be empty".into(),
        ));
    }

    let value = match value {
        Some(value) => value,
        None => prompt_secret_value()?,
    };
    if value.is_empty() {
        return Err(KeyholdError::Validation(
            "secret value must not be empty".into(),
        ));
    }

    unlock_session(session)?;
    let replaced = session.records()?.contains(name);
    session.add_or_update(name, value)?;

    if replaced {
        println!("Updated '{}'.", name);
    } else {
        println!("Added '{}'.", name);
    }
    Ok(())
}

/// Print a secret's value to stdout
pub fn handle_get_command(session: &mut Session, name: &str) -> KeyholdResult<()> {
    unlock_session(session)?;

    match session.records()?.get(name) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(KeyholdError::secret_not_found(name)),
    }
}

/// List stored secrets, values masked unless `show` is set
pub fn handle_list_command(session: &mut Session, show: bool) -> KeyholdResult<()> {
    unlock_session(session)?;
    let records = session.records()?;

    if records.is_empty() {
        println!("No secrets stored.");
        return Ok(());
    }

    for (name, value) in records.iter() {
        if show {
            println!("{:<32} {}", name, value);
        } else {
            println!("{:<32} {}", name, VALUE_MASK);
        }
    }
    println!();
    println!(
        "{} secret{} stored.",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Remove a secret
pub fn handle_remove_command(session: &mut Session, name: &str) -> KeyholdResult<()> {
    unlock_session(session)?;

    if session.remove(name)? {
        println!("Removed '{}'.", name);
        Ok(())
    } else {
        Err(KeyholdError::secret_not_found(name))
    }
}
