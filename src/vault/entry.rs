//! The credential record stored inside the vault.
//!
//! Entries serialize as camelCase JSON objects
//! (`{id, website, username, secret, createdAt}`) because that is the
//! on-disk layout of the `"credentials"` store key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored site credential.
///
/// An entry is immutable once created: the collection only ever grows by
/// appending new entries and shrinks by removing them whole. `id` and
/// `created_at` are assigned at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,

    /// The service this credential belongs to (e.g. "github.com").
    pub website: String,

    /// The login identifier for the service.
    pub username: String,

    /// The credential value, stored verbatim. Confidentiality is the
    /// backing store's responsibility.
    pub secret: String,

    /// When this entry was created.
    pub created_at: DateTime<Utc>,
}

impl CredentialEntry {
    /// Build a new entry with a fresh UUID and the current timestamp.
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            website: website.into(),
            username: username.into(),
            secret: secret.into(),
            created_at: Utc::now(),
        }
    }
}
