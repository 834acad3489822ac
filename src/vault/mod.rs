//! Vault module — authenticated access to a persisted credential collection.
//!
//! This module provides:
//! - the `CredentialEntry` record (`entry`)
//! - the master-credential gate (`gate`)
//! - the credential collection with serialized read-modify-write
//!   persistence (`repository`)
//! - the `VaultService` façade and its session tokens (`service`)

pub mod entry;
pub mod gate;
pub mod repository;
pub mod service;

// Re-export the most commonly used items.
pub use entry::CredentialEntry;
pub use gate::MasterCredentialGate;
pub use repository::CredentialRepository;
pub use service::{VaultService, VaultSession};
