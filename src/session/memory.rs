//! In-memory session store for tests and single-run sessions.

use std::sync::Mutex;

use super::{Session, SessionStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    session: Mutex<Option<Session>>,
    /// A token written by `set_token` before any session exists.
    orphan_token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out already logged in. Test helper.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            orphan_token: Mutex::new(None),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.session.lock().unwrap() = Some(session.clone());
        *self.orphan_token.lock().unwrap() = None;
        Ok(())
    }

    fn token(&self) -> Result<Option<String>, StoreError> {
        if let Some(session) = self.session.lock().unwrap().as_ref() {
            return Ok(Some(session.token.clone()));
        }
        Ok(self.orphan_token.lock().unwrap().clone())
    }

    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        if let Some(session) = self.session.lock().unwrap().as_mut() {
            session.token = token.to_string();
            return Ok(());
        }
        *self.orphan_token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let had_session = self.session.lock().unwrap().take().is_some();
        let had_token = self.orphan_token.lock().unwrap().take().is_some();
        Ok(had_session || had_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserProfile;

    #[test]
    fn clear_reports_presence_once() {
        let store = MemoryStore::new();
        assert!(!store.clear().unwrap());

        store
            .save(&Session {
                token: "t".to_string(),
                roles: vec![],
                user: UserProfile {
                    id: 1,
                    username: "u".to_string(),
                    email: "u@example.com".to_string(),
                    company_id: None,
                },
            })
            .unwrap();

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
    }
}
