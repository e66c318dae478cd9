//! JSON file session store.
//!
//! Persists the three session keys as one JSON object in the user config
//! directory (`~/.config/staffdesk/session.json` on Linux). Portable
//! fallback for environments without a usable keychain.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::{Session, SessionStore, StoreError, ROLES_KEY, TOKEN_KEY, USER_KEY};

/// Directory name under the user config dir.
const APP_DIR: &str = "staffdesk";
/// Session file name.
const FILE_NAME: &str = "session.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store under the platform config directory, falling back to the
    /// current directory when none is available.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join(APP_DIR).join(FILE_NAME))
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_doc(&self) -> Result<Map<String, Value>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let doc: Value = serde_json::from_slice(&bytes)?;
        match doc {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn write_doc(&self, doc: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&Value::Object(doc.clone()))?)?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let doc = self.read_doc()?;
        let (token, roles, user) = match (doc.get(TOKEN_KEY), doc.get(ROLES_KEY), doc.get(USER_KEY))
        {
            (Some(Value::String(t)), Some(r), Some(u)) => (t.clone(), r.clone(), u.clone()),
            _ => return Ok(None),
        };

        Ok(Some(Session {
            token,
            roles: serde_json::from_value(roles)?,
            user: serde_json::from_value(user)?,
        }))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut doc = self.read_doc()?;
        doc.insert(TOKEN_KEY.to_string(), Value::String(session.token.clone()));
        doc.insert(ROLES_KEY.to_string(), serde_json::to_value(&session.roles)?);
        doc.insert(USER_KEY.to_string(), serde_json::to_value(&session.user)?);
        self.write_doc(&doc)
    }

    fn token(&self) -> Result<Option<String>, StoreError> {
        let doc = self.read_doc()?;
        match doc.get(TOKEN_KEY) {
            Some(Value::String(token)) => Ok(Some(token.clone())),
            _ => Ok(None),
        }
    }

    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        let mut doc = self.read_doc()?;
        doc.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_doc(&doc)
    }

    fn clear(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::session::UserProfile;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "staffdesk-test-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    fn sample_session() -> Session {
        Session {
            token: "tok-1".to_string(),
            roles: vec!["ADMIN".to_string()],
            user: UserProfile {
                id: 7,
                username: "mrossi".to_string(),
                email: "m.rossi@example.com".to_string(),
                company_id: Some(2),
            },
        }
    }

    #[test]
    fn round_trip_and_clear() {
        let store = FileStore::at(temp_path("roundtrip"));
        let _ = store.clear();

        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());

        let session = sample_session();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), session);
        assert_eq!(store.token().unwrap().unwrap(), "tok-1");

        store.set_token("tok-2").unwrap();
        assert_eq!(store.token().unwrap().unwrap(), "tok-2");
        assert_eq!(store.load().unwrap().unwrap().roles, vec!["ADMIN"]);

        // First clear removes the session, second is a no-op.
        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn partial_document_is_not_a_session() {
        let store = FileStore::at(temp_path("partial"));
        let _ = store.clear();

        store.set_token("orphan").unwrap();
        // A token alone is readable but does not constitute a session.
        assert_eq!(store.token().unwrap().unwrap(), "orphan");
        assert!(store.load().unwrap().is_none());

        let _ = store.clear();
    }
}
