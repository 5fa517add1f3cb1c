//! Login session
//!
//! A [`Session`] is created at login, handed explicitly to every call that
//! needs the bearer token, and dropped at logout. [`SessionStore`] keeps it
//! on disk between command invocations.

use crate::inventory::{Token, User};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The authenticated user and their access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
    /// When the token was obtained
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a register/login response
    pub fn from_token(token: Token, issued_at: DateTime<Utc>) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            user: token.user,
            issued_at,
        }
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Whether the token has outlived `lifetime` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        self.expires_at(lifetime).is_some_and(|at| now >= at)
    }

    /// `None` when the expiry lies beyond the representable date range
    pub fn expires_at(&self, lifetime: Duration) -> Option<DateTime<Utc>> {
        self.issued_at.checked_add_signed(lifetime)
    }
}

/// Errors that can occur reading or writing the session file
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file error {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt {
        path: PathBuf,
        error: serde_json::Error,
    },
}

/// File-backed storage for the current session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open a store at `path`; a leading `~/` is expanded to the home directory
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_home(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, `None` if nobody is logged in
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    error,
                })
            }
        };

        let session = serde_json::from_str(&content).map_err(|error| SessionError::Corrupt {
            path: self.path.clone(),
            error,
        })?;

        Ok(Some(session))
    }

    /// Persist the session, creating parent directories as needed
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |error| SessionError::Io {
            path: self.path.clone(),
            error,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(session).map_err(|error| SessionError::Corrupt {
            path: self.path.clone(),
            error,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), user = %session.user.email, "Session saved");
        Ok(())
    }

    /// Forget the session; clearing an absent session is not an error
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::Io {
                path: self.path.clone(),
                error,
            }),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
