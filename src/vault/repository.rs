//! Credential collection with read-modify-write persistence.
//!
//! The underlying store has no per-entry update primitive: the whole
//! collection is one serialized value under one key. Every mutation is
//! therefore a full read + in-memory transform + full write-back, and
//! two overlapping cycles would silently discard the first writer's
//! result (a lost update). The repository owns a mutex that serializes
//! those cycles for its lifetime; it is held for the entire cycle and
//! released on every exit path.

use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::{Result, VaultError};
use crate::store::SecretStore;
use crate::vault::entry::CredentialEntry;

/// Store key holding the serialized credential collection.
pub(crate) const CREDENTIALS_KEY: &str = "credentials";

/// Owns the ordered collection of stored site credentials.
pub struct CredentialRepository {
    store: Arc<dyn SecretStore>,

    /// Serializes read-modify-write cycles (see module docs).
    write_lock: Mutex<()>,
}

impl CredentialRepository {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Return a snapshot of the collection in insertion order.
    ///
    /// The snapshot does not reflect mutations made after it was taken.
    /// An absent collection key means first use and reads as empty.
    pub fn list_all(&self) -> Result<Vec<CredentialEntry>> {
        self.load()
    }

    /// Append a new entry to the collection.
    ///
    /// Fails with `InvalidInput` before touching the store if any
    /// required field is empty, and with `DuplicateId` if the entry's id
    /// is already present. One store read + one store write.
    pub fn add(&self, entry: CredentialEntry) -> Result<()> {
        validate(&entry)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load()?;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(VaultError::DuplicateId(entry.id));
        }
        entries.push(entry);
        self.save(&entries)
    }

    /// Remove the entry with the given id.
    ///
    /// Returns `true` if an entry was removed and `false` if the id was
    /// not found — an idempotent no-op, not an error. One store read +
    /// one store write either way.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;

        self.save(&entries)?;
        Ok(removed)
    }

    /// Read and deserialize the collection from the store.
    fn load(&self) -> Result<Vec<CredentialEntry>> {
        match self.store.get(CREDENTIALS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| VaultError::CorruptState(format!("credential collection: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize the collection and write it back as one store value.
    fn save(&self, entries: &[CredentialEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| VaultError::CorruptState(format!("credential collection: {e}")))?;
        self.store.set(CREDENTIALS_KEY, &raw)
    }
}

/// Reject entries with empty required fields.
fn validate(entry: &CredentialEntry) -> Result<()> {
    for (field, value) in [
        ("id", &entry.id),
        ("website", &entry.website),
        ("username", &entry.username),
        ("secret", &entry.secret),
    ] {
        if value.is_empty() {
            return Err(VaultError::InvalidInput(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}
