//! Persisted-credential contract.
//!
//! The access token is the only durable state the session layer owns. It
//! must survive process restarts and be cleared atomically with in-memory
//! session state on logout or failed revalidation.
//!
//! The trait is synchronous on purpose: `logout()` must clear state
//! unconditionally without suspending, and token files are tiny.

use thiserror::Error;

/// Errors from the token persistence layer.
#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for the opaque access token.
///
/// Implementations must never log the token value.
pub trait TokenStore: Send + Sync {
    /// Reads the persisted token, if one exists.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Persists the token, replacing any previous one atomically.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Removes the persisted token. Removing an absent token succeeds.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
