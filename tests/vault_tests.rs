//! Integration tests for the SiteVault vault subsystem, exercised
//! through `VaultService` over a file-backed store.

use std::sync::Arc;

use tempfile::TempDir;

use sitevault::errors::VaultError;
use sitevault::store::{FileSecretStore, SecretStore};
use sitevault::vault::{CredentialEntry, VaultService};

/// Helper: build a service over a fresh file store in a temp dir.
fn service() -> (TempDir, VaultService) {
    let dir = TempDir::new().expect("create temp dir");
    let store = Arc::new(FileSecretStore::new(dir.path().join("store.json")));
    (dir, VaultService::new(store))
}

// ---------------------------------------------------------------------------
// First-use provisioning
// ---------------------------------------------------------------------------

#[test]
fn first_login_provisions_then_verifies() {
    let (_dir, service) = service();

    // Empty store: the first login provisions the vault.
    assert!(!service.is_provisioned().unwrap());
    service.login_or_provision("abc").unwrap();
    assert!(service.is_provisioned().unwrap());

    // Same credential logs in again; a different one is rejected.
    assert!(service.login_or_provision("abc").is_ok());
    assert!(matches!(
        service.login_or_provision("xyz").unwrap_err(),
        VaultError::AuthenticationFailed
    ));
}

#[test]
fn provisioning_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let service = VaultService::new(Arc::new(FileSecretStore::new(&path)));
    service.login_or_provision("master-pw").unwrap();

    // A brand-new service over the same file sees the provisioned vault.
    let reopened = VaultService::new(Arc::new(FileSecretStore::new(&path)));
    assert!(reopened.is_provisioned().unwrap());
    assert!(reopened.login_or_provision("master-pw").is_ok());
    assert!(reopened.login_or_provision("wrong").is_err());
}

// ---------------------------------------------------------------------------
// Add / list / remove round-trip
// ---------------------------------------------------------------------------

#[test]
fn add_list_remove_roundtrip() {
    let (_dir, service) = service();
    let session = service.login_or_provision("master-pw").unwrap();

    let entry = CredentialEntry::new("github.com", "alice", "hunter2");
    let id = entry.id.clone();

    service.add_credential(&session, entry.clone()).unwrap();

    let listed = service.list_credentials(&session).unwrap();
    assert_eq!(listed, vec![entry]);

    assert!(service.remove_credential(&session, &id).unwrap());
    assert!(service.list_credentials(&session).unwrap().is_empty());
}

#[test]
fn entries_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let entry = CredentialEntry::new("github.com", "alice", "hunter2");
    {
        let service = VaultService::new(Arc::new(FileSecretStore::new(&path)));
        let session = service.login_or_provision("master-pw").unwrap();
        service.add_credential(&session, entry.clone()).unwrap();
    }

    let service = VaultService::new(Arc::new(FileSecretStore::new(&path)));
    let session = service.login_or_provision("master-pw").unwrap();
    assert_eq!(service.list_credentials(&session).unwrap(), vec![entry]);
}

// ---------------------------------------------------------------------------
// Idempotent removal
// ---------------------------------------------------------------------------

#[test]
fn removing_unknown_id_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = Arc::new(FileSecretStore::new(&path));

    let service = VaultService::new(store.clone());
    let session = service.login_or_provision("master-pw").unwrap();
    service
        .add_credential(&session, CredentialEntry::new("a.com", "u", "p"))
        .unwrap();

    let before = store.get("credentials").unwrap();
    assert!(!service.remove_credential(&session, "nonexistent-id").unwrap());
    let after = store.get("credentials").unwrap();

    // Byte-for-byte identical serialized collection.
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn invalid_entry_is_rejected_without_store_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = Arc::new(FileSecretStore::new(&path));

    let service = VaultService::new(store.clone());
    let session = service.login_or_provision("master-pw").unwrap();

    let bad = CredentialEntry::new("", "u", "p");
    assert!(matches!(
        service.add_credential(&session, bad).unwrap_err(),
        VaultError::InvalidInput(_)
    ));

    // The collection key was never written.
    assert_eq!(store.get("credentials").unwrap(), None);
}

// ---------------------------------------------------------------------------
// Duplicate id rejection
// ---------------------------------------------------------------------------

#[test]
fn colliding_id_is_rejected_and_first_entry_kept() {
    let (_dir, service) = service();
    let session = service.login_or_provision("master-pw").unwrap();

    let first = CredentialEntry::new("first.com", "alice", "pw1");
    let mut second = CredentialEntry::new("second.com", "bob", "pw2");
    second.id = first.id.clone();

    service.add_credential(&session, first.clone()).unwrap();
    assert!(matches!(
        service.add_credential(&session, second).unwrap_err(),
        VaultError::DuplicateId(_)
    ));

    assert_eq!(service.list_credentials(&session).unwrap(), vec![first]);
}

// ---------------------------------------------------------------------------
// Corrupt persisted collection
// ---------------------------------------------------------------------------

#[test]
fn corrupt_collection_is_reported_not_swallowed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = Arc::new(FileSecretStore::new(&path));

    let service = VaultService::new(store.clone());
    let session = service.login_or_provision("master-pw").unwrap();

    store.set("credentials", "{ this is not a json array").unwrap();

    assert!(matches!(
        service.list_credentials(&session).unwrap_err(),
        VaultError::CorruptState(_)
    ));
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[test]
fn operations_require_a_live_session() {
    let (_dir, service) = service();
    let session = service.login_or_provision("master-pw").unwrap();

    service.logout(&session);

    assert!(matches!(
        service.list_credentials(&session).unwrap_err(),
        VaultError::AuthenticationFailed
    ));
    assert!(matches!(
        service
            .add_credential(&session, CredentialEntry::new("a.com", "u", "p"))
            .unwrap_err(),
        VaultError::AuthenticationFailed
    ));
    assert!(matches!(
        service.remove_credential(&session, "any-id").unwrap_err(),
        VaultError::AuthenticationFailed
    ));

    // Logging back in issues a fresh, working session.
    let session = service.login_or_provision("master-pw").unwrap();
    assert!(service.list_credentials(&session).is_ok());
}
