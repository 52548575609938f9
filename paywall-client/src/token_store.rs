//! Persistence for access and refresh tokens.
//!
//! The HTTP client only ever reads the token at request time, so swapping a
//! store's contents (login, refresh, logout) takes effect on the next request.

use crate::error::{ApiError, ApiResult};
use paywall_types::AuthTokens;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Where the client keeps the current session's tokens.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> ApiResult<Option<AuthTokens>>;

    fn save(&self, tokens: &AuthTokens) -> ApiResult<()>;

    /// Removes both tokens. Clearing an empty store is not an error.
    fn clear(&self) -> ApiResult<()>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<AuthTokens>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Option<AuthTokens>> {
        let guard = self
            .tokens
            .read()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, tokens: &AuthTokens) -> ApiResult<()> {
        let mut guard = self
            .tokens
            .write()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self
            .tokens
            .write()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Stores tokens as JSON in a single file, readable only by the owner on Unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/paywall/session.json`.
    pub fn default_path() -> ApiResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ApiError::Config("no configuration directory for this user".into()))?;
        Ok(base.join("paywall").join("session.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Option<AuthTokens>> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Storage(format!("{}: {e}", self.path.display()))),
        };
        let tokens = serde_json::from_slice(&raw)
            .map_err(|e| ApiError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(Some(tokens))
    }

    fn save(&self, tokens: &AuthTokens) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::Storage(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_vec_pretty(tokens)?;
        std::fs::write(&self.path, json)
            .map_err(|e| ApiError::Storage(format!("{}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| ApiError::Storage(format!("{}: {e}", self.path.display())))?;
        }

        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}
