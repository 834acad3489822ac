//! Master credential gate — the single source of truth for "is the
//! vault provisioned" and "is a presented credential correct".

use std::sync::Arc;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};
use crate::store::SecretStore;

/// Store key holding the master credential.
pub(crate) const MASTER_CREDENTIAL_KEY: &str = "masterCredential";

/// Owns the single master-credential value.
pub struct MasterCredentialGate {
    store: Arc<dyn SecretStore>,
}

impl MasterCredentialGate {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Returns `true` iff a master credential has been stored.
    ///
    /// No side effects.
    pub fn is_provisioned(&self) -> Result<bool> {
        Ok(self.store.get(MASTER_CREDENTIAL_KEY)?.is_some())
    }

    /// Set the master credential, unconditionally overwriting any prior
    /// value. Whether re-provisioning is allowed at all is the caller's
    /// policy decision, not this gate's.
    pub fn provision(&self, candidate: &str) -> Result<()> {
        if candidate.is_empty() {
            return Err(VaultError::InvalidInput(
                "master credential cannot be empty".into(),
            ));
        }
        self.store.set(MASTER_CREDENTIAL_KEY, candidate)
    }

    /// Check a presented credential against the stored one.
    ///
    /// Fails with `NotProvisioned` if no master credential exists. The
    /// comparison is constant-time; the fetched copy is wiped on drop.
    /// No side effects.
    pub fn verify(&self, candidate: &str) -> Result<bool> {
        let stored = self
            .store
            .get(MASTER_CREDENTIAL_KEY)?
            .ok_or(VaultError::NotProvisioned)?;
        let stored = Zeroizing::new(stored);

        Ok(stored.as_bytes().ct_eq(candidate.as_bytes()).into())
    }
}
