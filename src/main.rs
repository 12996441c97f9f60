use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use keyhold::cli::{
    handle_add_command, handle_clear_command, handle_export_command, handle_get_command,
    handle_import_command, handle_list_command, handle_remove_command, handle_status_command,
    ExportCommands,
};
use keyhold::config::paths::KeyholdPaths;
use keyhold::session::Session;
use keyhold::storage::Store;

#[derive(Parser)]
#[command(
    name = "keyhold",
    version,
    about = "Terminal-based encrypted secret manager",
    long_about = "keyhold stores name/value secrets encrypted at rest, protected by a \
                  single passphrase. Secrets are sealed with AES-256-GCM under a key \
                  derived from your passphrase; losing the passphrase means losing \
                  the data."
)]
struct Cli {
    /// Override the data directory
    #[arg(long, global = true, env = "KEYHOLD_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or update a secret
    Add {
        /// Secret name
        name: String,
        /// Secret value (prompted without echo if omitted)
        value: Option<String>,
    },

    /// Print a secret's value
    Get {
        /// Secret name
        name: String,
    },

    /// List stored secrets
    #[command(alias = "ls")]
    List {
        /// Show values in plaintext instead of masking them
        #[arg(long)]
        show: bool,
    },

    /// Remove a secret
    #[command(alias = "rm")]
    Remove {
        /// Secret name
        name: String,
    },

    /// Export the store
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import an encrypted backup, replacing the current store
    Import {
        /// Path to a backup file
        file: PathBuf,

        /// Accept the backup without decrypting it first (verified at the
        /// next unlock instead)
        #[arg(long)]
        no_verify: bool,
    },

    /// Delete all encrypted data (the salt is retained)
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show store status and paths
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => KeyholdPaths::with_base_dir(dir),
        None => KeyholdPaths::new()?,
    };
    let store = Store::new(paths)?;
    let mut session = Session::new(store);

    match cli.command {
        Commands::Add { name, value } => handle_add_command(&mut session, &name, value)?,
        Commands::Get { name } => handle_get_command(&mut session, &name)?,
        Commands::List { show } => handle_list_command(&mut session, show)?,
        Commands::Remove { name } => handle_remove_command(&mut session, &name)?,
        Commands::Export(cmd) => handle_export_command(&mut session, cmd)?,
        Commands::Import { file, no_verify } => {
            handle_import_command(&mut session, &file, no_verify)?
        }
        Commands::Clear { yes } => handle_clear_command(&mut session, yes)?,
        Commands::Status => handle_status_command(&session)?,
    }

    session.lock();
    Ok(())
}
