//! Session collaborator
//!
//! Holds the bearer token and the signed-in user. The app owns the single
//! `Session` and hands it to the code that needs it; writes only happen after
//! a request succeeded, and every write is mirrored to disk when a store is
//! attached.

use crate::api::UserProfile;
use crate::config::project_dirs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What a session consists of
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

/// JSON file the session is persisted to
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store in the platform config directory
    pub fn default_location() -> Option<Self> {
        project_dirs().map(|dirs| Self::at(dirs.config_dir().join("session.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, empty when there is none
    pub fn load(&self) -> Result<SessionData> {
        if !self.path.exists() {
            return Ok(SessionData::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session {}", self.path.display()))
    }

    pub fn save(&self, data: &SessionData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session {}", self.path.display()))
    }

    pub fn remove(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Token and current user shared by every form
#[derive(Debug, Default)]
pub struct Session {
    data: SessionData,
    store: Option<SessionStore>,
}

impl Session {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session restored from, and mirrored to, a store
    pub fn persistent(store: SessionStore) -> Self {
        tracing::debug!("Session stored at {}", store.path().display());
        let data = match store.load() {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("Ignoring unreadable session: {err:#}");
                SessionData::default()
            }
        };
        Self {
            data,
            store: Some(store),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.data.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.token.is_some()
    }

    /// Start a new session; the previous user no longer applies
    pub fn set_token(&mut self, token: String) {
        self.data.token = Some(token);
        self.data.user = None;
        self.persist();
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.data.user = Some(user);
        self.persist();
    }

    /// Forget token and user
    pub fn clear(&mut self) {
        self.data = SessionData::default();
        if let Some(store) = &self.store {
            if let Err(err) = store.remove() {
                tracing::warn!("Failed to remove stored session: {err:#}");
            }
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.data) {
                tracing::warn!("Failed to store session: {err:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserProfile {
        UserProfile {
            id: Some("u1".to_string()),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    mod in_memory {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_signed_out() {
            let session = Session::in_memory();
            assert!(!session.is_authenticated());
            assert!(session.token().is_none());
            assert!(session.user().is_none());
        }

        #[test]
        fn test_set_token_drops_previous_user() {
            let mut session = Session::in_memory();
            session.set_token("T1".to_string());
            session.set_user(alice());
            session.set_token("T2".to_string());
            assert_eq!(session.token(), Some("T2"));
            assert!(session.user().is_none());
        }

        #[test]
        fn test_clear_forgets_everything() {
            let mut session = Session::in_memory();
            session.set_token("T1".to_string());
            session.set_user(alice());
            session.clear();
            assert!(!session.is_authenticated());
            assert!(session.user().is_none());
        }
    }

    mod persistent {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_file_is_empty_session() {
            let dir = tempfile::tempdir().unwrap();
            let session = Session::persistent(SessionStore::at(dir.path().join("session.json")));
            assert!(!session.is_authenticated());
        }

        #[test]
        fn test_writes_survive_restart() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("session.json");

            let mut session = Session::persistent(SessionStore::at(&path));
            session.set_token("T1".to_string());
            session.set_user(alice());

            let restored = Session::persistent(SessionStore::at(&path));
            assert_eq!(restored.token(), Some("T1"));
            assert_eq!(restored.user(), Some(&alice()));
        }

        #[test]
        fn test_clear_removes_file() {
            let dir = tempfile::tempdir().unwrap();
            let store = SessionStore::at(dir.path().join("session.json"));
            let mut session = Session::persistent(store.clone());
            session.set_token("T1".to_string());
            assert!(store.path().exists());

            session.clear();
            assert!(!store.path().exists());
        }

        #[test]
        fn test_corrupt_file_is_ignored() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            fs::write(&path, "{not json").unwrap();
            let session = Session::persistent(SessionStore::at(&path));
            assert!(!session.is_authenticated());
        }
    }
}
