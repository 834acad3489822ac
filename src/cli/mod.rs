//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::store::{FileSecretStore, SecretStore};
use crate::vault::{VaultService, VaultSession};

/// Minimum master credential length enforced when provisioning.
const MIN_MASTER_LEN: usize = 6;

/// SiteVault CLI: local-first site credential vault.
#[derive(Parser)]
#[command(
    name = "sitevault",
    about = "Local-first site credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .sitevault)
    #[arg(long, default_value = ".sitevault", global = true)]
    pub vault_dir: String,

    /// Keep vault data in the OS keyring instead of the store file
    #[cfg(feature = "keyring-store")]
    #[arg(long, global = true)]
    pub keyring: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a site credential
    Add {
        /// The service the credential belongs to (e.g. github.com)
        website: String,
        /// Login identifier for the service
        username: String,
        /// Credential value (omit for interactive prompt)
        secret: Option<String>,
    },

    /// List stored credentials
    List {
        /// Show secret values in the table
        #[arg(long)]
        show_secrets: bool,
    },

    /// Remove a credential by id
    Remove {
        /// Credential id (see `sitevault list`)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show vault status
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the full path to the secret store file.
///
/// The directory comes from the CLI arguments, the file name from
/// `.sitevault.toml` (defaulting to `store.json`).
///
/// Example: `<cwd>/.sitevault/store.json`
pub fn store_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok(cwd.join(&cli.vault_dir).join(&settings.store_file))
}

/// Open the secret store backend selected by the CLI arguments.
pub fn open_store(cli: &Cli) -> Result<Arc<dyn SecretStore>> {
    #[cfg(feature = "keyring-store")]
    if cli.keyring {
        let scope = std::env::current_dir()?
            .join(&cli.vault_dir)
            .to_string_lossy()
            .into_owned();
        return Ok(Arc::new(crate::store::KeyringSecretStore::new(scope)));
    }

    Ok(Arc::new(FileSecretStore::new(store_path(cli)?)))
}

/// Get the master credential for an already-provisioned vault, trying
/// in order:
/// 1. `SITEVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the credential is wiped from memory on drop.
pub fn prompt_master() -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first (CI/CD friendly).
    if let Ok(pw) = std::env::var("SITEVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // 2. Fall back to interactive prompt.
    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master credential with confirmation (first-use
/// provisioning path).
///
/// Also respects `SITEVAULT_PASSWORD` for scripted/CI usage.
/// Enforces a minimum credential length.
///
/// Returns `Zeroizing<String>` so the credential is wiped from memory on drop.
pub fn prompt_master_new() -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/CD friendly).
    if let Ok(pw) = std::env::var("SITEVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_MASTER_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "master password must be at least {MIN_MASTER_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_MASTER_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_MASTER_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Open the store and authenticate, provisioning the vault on first use.
///
/// Returns the service together with the session token the commands
/// need for collection operations.
pub fn unlock_vault(cli: &Cli) -> Result<(VaultService, VaultSession)> {
    let service = VaultService::new(open_store(cli)?);

    let first_use = !service.is_provisioned()?;
    let master = if first_use {
        output::info("No vault found — setting up a new one.");
        prompt_master_new()?
    } else {
        prompt_master()?
    };

    let session = service.login_or_provision(&master)?;

    if first_use {
        #[cfg(feature = "audit-log")]
        crate::audit::log_audit(cli, "provision", None, Some("vault provisioned"));
        output::success("Vault provisioned.");
    }

    Ok((service, session))
}
