//! CLI commands for backup, import, and store clearing
//!
//! The encrypted backup is the persisted envelope's exact bytes; the CSV
//! export is plaintext and warned about accordingly.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{KeyholdError, KeyholdResult};
use crate::export::{self, write_records_csv};
use crate::session::Session;

use super::unlock_session;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the encrypted backup (safe to store anywhere)
    Backup {
        /// Output file path
        #[arg(default_value = export::BACKUP_FILENAME)]
        output: PathBuf,
    },

    /// Export all secrets as plaintext CSV (unsafe: values are readable)
    Csv {
        /// Output file path
        #[arg(default_value = export::CSV_FILENAME)]
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &mut Session, cmd: ExportCommands) -> KeyholdResult<()> {
    match cmd {
        ExportCommands::Backup { output } => export_backup(session, &output),
        ExportCommands::Csv { output } => export_csv(session, &output),
    }
}

fn export_backup(session: &mut Session, output: &Path) -> KeyholdResult<()> {
    unlock_session(session)?;

    let bytes = session.export_envelope()?;
    fs::write(output, &bytes)
        .map_err(|e| KeyholdError::Export(format!("Failed to write {}: {}", output.display(), e)))?;

    println!("Exported encrypted backup to {}.", output.display());
    println!("The backup can only be decrypted with your passphrase.");
    Ok(())
}

fn export_csv(session: &mut Session, output: &Path) -> KeyholdResult<()> {
    unlock_session(session)?;
    let records = session.records()?;

    let file = fs::File::create(output)
        .map_err(|e| KeyholdError::Export(format!("Failed to create {}: {}", output.display(), e)))?;
    write_records_csv(records, BufWriter::new(file))?;

    println!("Exported {} secret(s) to {}.", records.len(), output.display());
    println!("WARNING: the CSV contains your secrets in plaintext. Handle and delete it accordingly.");
    Ok(())
}

/// Import an encrypted backup, fully replacing the current store
///
/// By default the backup is decrypted against your passphrase first, so a
/// mismatched backup is rejected before anything is overwritten. With
/// `skip_verify` the backup is accepted as-is and only checked at the next
/// unlock.
pub fn handle_import_command(
    session: &mut Session,
    file: &Path,
    skip_verify: bool,
) -> KeyholdResult<()> {
    let bytes = fs::read(file)
        .map_err(|e| KeyholdError::Import(format!("Failed to read {}: {}", file.display(), e)))?;

    if !skip_verify {
        unlock_session(session)?;
    }
    session.import_envelope(&bytes)?;

    if session.is_unlocked() {
        println!(
            "Imported and loaded {} secret(s).",
            session.records()?.len()
        );
    } else {
        println!("Imported. Unlock with the matching passphrase to access the secrets.");
    }
    Ok(())
}

/// Delete the envelope slot after confirmation; the salt is retained
pub fn handle_clear_command(session: &mut Session, yes: bool) -> KeyholdResult<()> {
    if !yes {
        print!("Clear all encrypted data from the local store? This cannot be undone. (yes/no): ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let mut confirm = String::new();
        std::io::stdin().read_line(&mut confirm)?;

        if confirm.trim().to_lowercase() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    if session.clear_store()? {
        println!("Cleared local encrypted storage.");
    } else {
        println!("Nothing to clear.");
    }
    Ok(())
}
