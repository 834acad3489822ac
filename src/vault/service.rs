//! The vault façade the presentation layer talks to.
//!
//! `VaultService` sequences the gate and the repository: no collection
//! operation proceeds without a session token issued by a successful
//! `login_or_provision`. Session state is `Unauthenticated` until login
//! and returns there on `logout`; there is no automatic expiry.

use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::errors::{Result, VaultError};
use crate::store::SecretStore;
use crate::vault::entry::CredentialEntry;
use crate::vault::gate::MasterCredentialGate;
use crate::vault::repository::CredentialRepository;

/// Opaque proof of a successful login.
///
/// Holds the token issued by `login_or_provision`; collection operations
/// check it against the service's active session. The token is not
/// `Clone` on purpose — one login, one handle.
#[derive(Debug)]
pub struct VaultSession {
    token: Uuid,
}

/// Composes the master-credential gate and the credential repository
/// into the single entry point callers use.
pub struct VaultService {
    gate: MasterCredentialGate,
    repository: CredentialRepository,

    /// Token of the currently authenticated session, if any.
    active: Mutex<Option<Uuid>>,
}

impl VaultService {
    /// Build a service on top of a secret store. Gate and repository
    /// share the store but operate on disjoint keys.
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            gate: MasterCredentialGate::new(store.clone()),
            repository: CredentialRepository::new(store),
            active: Mutex::new(None),
        }
    }

    /// Whether a master credential has been set.
    pub fn is_provisioned(&self) -> Result<bool> {
        self.gate.is_provisioned()
    }

    /// Authenticate, provisioning the vault on first use.
    ///
    /// On an unprovisioned vault the candidate becomes the master
    /// credential (no confirmation step at this layer). On a provisioned
    /// vault the candidate is verified; a mismatch is
    /// `AuthenticationFailed`. Success issues a fresh session token and
    /// makes it the active session.
    pub fn login_or_provision(&self, candidate: &str) -> Result<VaultSession> {
        if self.gate.is_provisioned()? {
            if !self.gate.verify(candidate)? {
                return Err(VaultError::AuthenticationFailed);
            }
        } else {
            self.gate.provision(candidate)?;
        }

        let token = Uuid::new_v4();
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(VaultSession { token })
    }

    /// End the session. A stale token is a no-op — the caller is already
    /// logged out.
    pub fn logout(&self, session: &VaultSession) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if *active == Some(session.token) {
            *active = None;
        }
    }

    /// Append a credential to the collection.
    pub fn add_credential(&self, session: &VaultSession, entry: CredentialEntry) -> Result<()> {
        self.check_session(session)?;
        self.repository.add(entry)
    }

    /// Snapshot of the stored credentials in insertion order.
    pub fn list_credentials(&self, session: &VaultSession) -> Result<Vec<CredentialEntry>> {
        self.check_session(session)?;
        self.repository.list_all()
    }

    /// Remove a credential by id. Returns `false` for an unknown id.
    pub fn remove_credential(&self, session: &VaultSession, id: &str) -> Result<bool> {
        self.check_session(session)?;
        self.repository.remove(id)
    }

    /// Reject tokens that are not the active session.
    fn check_session(&self, session: &VaultSession) -> Result<()> {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if *active == Some(session.token) {
            Ok(())
        } else {
            Err(VaultError::AuthenticationFailed)
        }
    }
}
