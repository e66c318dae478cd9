//! OS keychain session store.
//!
//! Uses the `keyring` crate; each of the three session keys is a separate
//! entry under one service name, so the credential never touches disk in
//! plain text. `NoEntry` reads map to `None` and deletes are idempotent.

use keyring::Entry;

use super::{Session, SessionStore, StoreError, UserProfile, ROLES_KEY, TOKEN_KEY, USER_KEY};

/// Default keychain service name.
const SERVICE_NAME: &str = "com.staffdesk.client";

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::Keychain(err.to_string())
    }
}

pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a non-default service name (one session per environment).
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    /// Idempotent delete; reports whether the entry existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(StoreError::from(e)),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for KeychainStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let (token, roles, user) = match (
            self.read(TOKEN_KEY)?,
            self.read(ROLES_KEY)?,
            self.read(USER_KEY)?,
        ) {
            (Some(t), Some(r), Some(u)) => (t, r, u),
            _ => return Ok(None),
        };

        let roles: Vec<String> = serde_json::from_str(&roles)?;
        let user: UserProfile = serde_json::from_str(&user)?;
        Ok(Some(Session { token, roles, user }))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.write(TOKEN_KEY, &session.token)?;
        self.write(ROLES_KEY, &serde_json::to_string(&session.roles)?)?;
        self.write(USER_KEY, &serde_json::to_string(&session.user)?)?;
        Ok(())
    }

    fn token(&self) -> Result<Option<String>, StoreError> {
        self.read(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.write(TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let token = self.remove(TOKEN_KEY)?;
        let roles = self.remove(ROLES_KEY)?;
        let user = self.remove(USER_KEY)?;
        Ok(token || roles || user)
    }
}
