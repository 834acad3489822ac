//! OS keyring secret store.
//!
//! Stores each vault key as its own entry in the operating system's
//! secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! This is the backend to use when the host platform's secure storage
//! should hold the vault data. Keyring failures are reported as
//! `StoreUnavailable` so callers can fall back to another backend.

use crate::errors::{Result, VaultError};
use crate::store::SecretStore;

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "sitevault";

/// Secret store backed by the OS keyring, one entry per vault key.
pub struct KeyringSecretStore {
    /// Scope string mixed into every entry name so that two vaults on
    /// the same machine do not collide (usually the vault directory).
    scope: String,
}

impl KeyringSecretStore {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// Build the keyring entry name for a vault key.
    fn entry_name(&self, key: &str) -> String {
        format!("{}:{key}", self.scope)
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE_NAME, &self.entry_name(key)).map_err(|e| {
            VaultError::StoreUnavailable(format!("failed to create keyring entry: {e}"))
        })
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(VaultError::StoreUnavailable(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value).map_err(|e| {
            VaultError::StoreUnavailable(format!("failed to store in keyring: {e}"))
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
            Err(e) => Err(VaultError::StoreUnavailable(format!(
                "failed to delete from keyring: {e}"
            ))),
        }
    }
}
