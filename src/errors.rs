use thiserror::Error;

/// All errors that can occur in SiteVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Input validation ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Gate errors ---
    #[error("Vault is not provisioned yet — the master credential must be set first")]
    NotProvisioned,

    #[error("Authentication failed — invalid master credential")]
    AuthenticationFailed,

    // --- Collection errors ---
    #[error("A credential with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Stored credential data is corrupt: {0}")]
    CorruptState(String),

    // --- Store errors ---
    #[error("Secret store unavailable: {0}")]
    StoreUnavailable(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for SiteVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
