//! Persisted session credentials.
//!
//! A session is the bearer token, the role list, and the user profile the
//! login endpoint returns. The three live under separate storage keys but
//! are written together on login and cleared together on logout or terminal
//! authentication failure; the token alone is rewritten on refresh.
//!
//! Three store backends: the OS keychain (default for the CLI), a JSON file
//! in the user config directory, and a process-local memory store for tests
//! and headless use.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized role list.
pub const ROLES_KEY: &str = "userRoles";
/// Storage key for the serialized user profile.
pub const USER_KEY: &str = "user";

/// Profile of the logged-in account, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub company_id: Option<i64>,
}

/// A complete session credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub roles: Vec<String>,
    pub user: UserProfile,
}

impl Session {
    /// Whether the session carries at least one of the given roles.
    pub fn has_role(&self, required: &[&str]) -> bool {
        self.roles
            .iter()
            .any(|role| required.iter().any(|r| r == role))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("keychain operation failed: {0}")]
    Keychain(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent key-value store for the session credential.
///
/// Implementations must tolerate concurrent readers; writes happen at the
/// session lifecycle points only (login, logout, refresh, terminal auth
/// failure), and the refresh path is serialized by the client.
pub trait SessionStore: Send + Sync {
    /// The stored session, or `None` unless all three keys are present.
    fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Write token, roles, and user profile together.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// The stored bearer token. Read on every outgoing request.
    fn token(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the token only, leaving roles and profile untouched.
    /// Used when a refresh succeeds.
    fn set_token(&self, token: &str) -> Result<(), StoreError>;

    /// Remove all three keys. Idempotent; returns whether any session data
    /// was actually present, which drives the once-only auth-lost event.
    fn clear(&self) -> Result<bool, StoreError>;
}
