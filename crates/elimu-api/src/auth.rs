//! Auth token storage.
//!
//! The client never keeps tokens in a hidden global. Whoever builds the
//! [`ApiClient`](crate::ApiClient) injects an [`AuthStore`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use elimu_model::{AuthSession, UserProfile};

use crate::error::{ApiError, Result};

/// Storage for the signed-in user's session.
pub trait AuthStore: Send + Sync {
    /// The stored session, if any.
    fn session(&self) -> Option<AuthSession>;

    /// Replace the stored session.
    fn set_session(&self, session: AuthSession) -> Result<()>;

    /// Forget the stored session.
    fn clear(&self) -> Result<()>;

    /// Stored bearer token.
    fn get_token(&self) -> Option<String> {
        self.session()
            .map(|session| session.access_token)
            .filter(|token| !token.is_empty())
    }

    /// Store a bearer token, keeping any cached profile.
    fn set_token(&self, token: &str) -> Result<()> {
        let mut session = self.session().unwrap_or_default();
        session.access_token = token.to_string();
        self.set_session(session)
    }

    /// Cached profile of the signed-in user.
    fn current_user(&self) -> Option<UserProfile> {
        self.session().and_then(|session| session.user)
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store; the session lives as long as the store.
#[derive(Debug, Default)]
pub struct MemoryAuthStore {
    session: Mutex<Option<AuthSession>>,
}

impl MemoryAuthStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session: Mutex::new(Some(AuthSession {
                access_token: token.into(),
                ..Default::default()
            })),
        }
    }
}

impl AuthStore for MemoryAuthStore {
    fn session(&self) -> Option<AuthSession> {
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set_session(&self, session: AuthSession) -> Result<()> {
        *self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Session persisted as JSON on disk.
///
/// A missing or unreadable file reads as "signed out".
#[derive(Debug, Clone)]
pub struct FileAuthStore {
    path: PathBuf,
}

impl FileAuthStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuthStore for FileAuthStore {
    fn session(&self) -> Option<AuthSession> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set_session(&self, session: AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::Storage(format!("failed to create session directory: {e}")))?;
        }
        let content = serde_json::to_string_pretty(&session)
            .map_err(|e| ApiError::Storage(format!("failed to serialize session: {e}")))?;
        std::fs::write(&self.path, content)
            .map_err(|e| ApiError::Storage(format!("failed to write session: {e}")))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!("failed to remove session: {e}"))),
        }
    }
}
