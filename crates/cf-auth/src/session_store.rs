use std::fs;
use std::path::{Path, PathBuf};

use cf_core::identity::Session;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "codeflow-cli";
const KEYRING_USER: &str = "session";
const SESSION_FILE_NAME: &str = "session.json";

/// Env var holding a serialized session (CI and headless use).
pub const SESSION_ENV_VAR: &str = "CODEFLOW_AUTH__SESSION";

/// Where a loaded session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Keyring,
    Env,
    File,
}

impl SessionSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted session storage. Priority: keyring → `CODEFLOW_AUTH__SESSION` env
/// → file (`~/.codeflow/session.json`).
#[derive(Debug, Clone)]
pub struct SessionStore {
    keyring_service: Option<String>,
    file_path: Option<PathBuf>,
    read_env: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Store backed by the OS keychain with a file fallback.
    ///
    /// The keyring service defaults to `"codeflow-cli"`. Override via
    /// `CODEFLOW_KEYRING_SERVICE` to keep test runs away from real credentials.
    #[must_use]
    pub fn new() -> Self {
        let service = std::env::var("CODEFLOW_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Self {
            keyring_service: Some(service),
            file_path: default_session_path(),
            read_env: true,
        }
    }

    /// Store that only touches `path`. Used by tests.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            file_path: Some(path.into()),
            read_env: false,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Persist `session`. Falls back to the file if the keyring is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if both keyring and file storage fail.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::SessionStoreError(format!("serialize session: {e}")))?;

        if let Some(service) = &self.keyring_service {
            match keyring::Entry::new(service, KEYRING_USER) {
                Ok(entry) => match entry.set_password(&json) {
                    Ok(()) => return Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                }
            }
        }

        self.save_file(&json)
    }

    /// Load the persisted session, if any.
    ///
    /// Unparseable entries are skipped with a warning.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        self.load_with_source().map(|(session, _)| session)
    }

    /// Which tier the current session comes from (for status display).
    #[must_use]
    pub fn detect_source(&self) -> Option<SessionSource> {
        self.load_with_source().map(|(_, source)| source)
    }

    fn load_with_source(&self) -> Option<(Session, SessionSource)> {
        // 1. Keyring
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
            && let Ok(json) = entry.get_password()
            && let Some(session) = parse(&json, SessionSource::Keyring)
        {
            return Some((session, SessionSource::Keyring));
        }

        // 2. Environment variable
        if self.read_env
            && let Ok(json) = std::env::var(SESSION_ENV_VAR)
            && let Some(session) = parse(&json, SessionSource::Env)
        {
            return Some((session, SessionSource::Env));
        }

        // 3. File fallback
        let path = self.file_path.as_ref()?;
        let json = fs::read_to_string(path).ok()?;
        parse(&json, SessionSource::File).map(|session| (session, SessionSource::File))
    }

    /// Remove the session from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the session file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
        {
            let _ = entry.delete_credential();
        }

        if let Some(path) = &self.file_path
            && path.exists()
        {
            fs::remove_file(path).map_err(|e| {
                AuthError::SessionStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn save_file(&self, json: &str) -> Result<(), AuthError> {
        let path = self.file_path.as_ref().ok_or_else(|| {
            AuthError::SessionStoreError("home directory not found; cannot store session".into())
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        fs::write(path, json)
            .map_err(|e| AuthError::SessionStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }
}

fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".codeflow").join(SESSION_FILE_NAME))
}

fn parse(json: &str, source: SessionSource) -> Option<Session> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, %source, "ignoring unreadable stored session");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::identity::AuthUser;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session {
            access_token: "a.b.c".into(),
            refresh_token: Some("refresh".into()),
            token_type: "bearer".into(),
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            user: AuthUser {
                id: "u-1".into(),
                email: Some("dev@example.com".into()),
                phone: None,
                created_at: None,
            },
        }
    }

    #[test]
    fn default_path_is_under_home() {
        let path = default_session_path().expect("should resolve");
        assert!(path.ends_with(".codeflow/session.json"));
    }

    #[test]
    fn file_save_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::file_only(tmp.path().join("nested").join("session.json"));

        assert!(store.load().is_none());
        store.save(&session()).expect("save");
        assert_eq!(store.load(), Some(session()));
        assert_eq!(store.detect_source(), Some(SessionSource::File));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.file_path().unwrap())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "session file should be 0600");
        }

        store.delete().expect("delete");
        assert!(store.load().is_none());
        assert!(!store.file_path().unwrap().exists());
    }

    #[test]
    fn delete_without_file_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::file_only(tmp.path().join("session.json"));
        assert!(store.delete().is_ok());
    }

    #[test]
    fn load_ignores_blank_and_corrupt_files() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        let store = SessionStore::file_only(&path);

        std::fs::write(&path, "   \n  ").expect("write");
        assert!(store.load().is_none());

        std::fs::write(&path, "{not json").expect("write");
        assert!(store.load().is_none());
        assert!(store.detect_source().is_none());
    }
}
