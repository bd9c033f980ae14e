//! On-disk session cache.
//!
//! One JSON file holding the most recent session. Missing and expired
//! entries both read back as "no session"; an unreadable or undecodable
//! file is an error, which the session gate treats as a failed query.

use std::fs;
use std::path::PathBuf;

use deck_core::backend::BackendError;
use deck_core::session::Session;

/// File-backed store for the signed-in session.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The cached session, if present and not expired.
    ///
    /// # Errors
    ///
    /// [`BackendError::Transport`] if the file exists but cannot be read,
    /// [`BackendError::Decode`] if it cannot be parsed.
    pub fn load(&self) -> Result<Option<Session>, BackendError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|err| {
            BackendError::Transport(format!("read {}: {err}", self.path.display()))
        })?;
        let session: Session = serde_json::from_str(&content).map_err(|err| {
            BackendError::Decode(format!("parse {}: {err}", self.path.display()))
        })?;

        if session.is_expired() {
            tracing::debug!(path = %self.path.display(), "cached session expired");
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Persist a session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// [`BackendError::Transport`] if the file cannot be written.
    pub fn store(&self, session: &Session) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                BackendError::Transport(format!("create {}: {err}", parent.display()))
            })?;
        }
        let content = serde_json::to_string_pretty(session)
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        fs::write(&self.path, content).map_err(|err| {
            BackendError::Transport(format!("write {}: {err}", self.path.display()))
        })
    }

    /// Remove the cached session. Removing a missing cache succeeds.
    ///
    /// # Errors
    ///
    /// [`BackendError::Transport`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), BackendError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BackendError::Transport(format!(
                "remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionCache;
    use chrono::Utc;
    use deck_core::backend::BackendError;
    use deck_core::session::Session;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> SessionCache {
        SessionCache::new(dir.path().join("deck/session.json"))
    }

    #[test]
    fn missing_cache_reads_as_no_session() {
        let dir = TempDir::new().expect("temp dir");
        assert!(cache_in(&dir).load().expect("load").is_none());
    }

    #[test]
    fn store_then_load_roundtrips() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cache_in(&dir);
        let session = Session::local("a@example.com");

        cache.store(&session).expect("store");
        let loaded = cache.load().expect("load").expect("session present");
        assert_eq!(loaded, session);
    }

    #[test]
    fn expired_session_reads_as_no_session() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cache_in(&dir);
        let mut session = Session::local("a@example.com");
        session.expires_at = Utc::now().timestamp() - 1;

        cache.store(&session).expect("store");
        assert!(cache.load().expect("load").is_none());
    }

    #[test]
    fn corrupt_cache_is_a_decode_error() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cache_in(&dir);
        std::fs::create_dir_all(dir.path().join("deck")).expect("mkdir");
        std::fs::write(dir.path().join("deck/session.json"), "not json").expect("write");

        assert!(matches!(cache.load(), Err(BackendError::Decode(_))));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cache_in(&dir);
        cache.clear().expect("clear missing");

        cache.store(&Session::local("a@example.com")).expect("store");
        cache.clear().expect("clear present");
        assert!(cache.load().expect("load").is_none());
    }
}
