//! Durable bearer token storage.
//!
//! The slot is shared between the request proxy (which reads the token on
//! every call) and the session store (which writes it on login/logout and
//! persists it across process restarts).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// On-disk session file shape.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Shared slot holding the current bearer token.
#[derive(Clone)]
pub(crate) struct TokenSlot {
    inner: Arc<TokenSlotInner>,
}

struct TokenSlotInner {
    path: PathBuf,
    token: RwLock<Option<SecretString>>,
}

impl TokenSlot {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            inner: Arc::new(TokenSlotInner {
                path: path.to_path_buf(),
                token: RwLock::new(None),
            }),
        }
    }

    /// Current token, if any.
    pub(crate) async fn get(&self) -> Option<SecretString> {
        self.inner.token.read().await.clone()
    }

    pub(crate) async fn set(&self, token: SecretString) {
        *self.inner.token.write().await = Some(token);
    }

    pub(crate) async fn clear(&self) {
        *self.inner.token.write().await = None;
    }

    /// Write the current token to disk. Does nothing if the slot is empty.
    ///
    /// On unix the session file is readable only by the owning user.
    pub(crate) async fn persist(&self) -> io::Result<()> {
        let guard = self.inner.token.read().await;
        let Some(token) = guard.as_ref() else {
            return Ok(());
        };

        let body = serde_json::to_vec_pretty(&SessionFile {
            token: token.expose_secret().to_string(),
        })
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        tokio::fs::write(&self.inner.path, body).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(
                &self.inner.path,
                std::fs::Permissions::from_mode(0o600),
            )
            .await?;
        }

        Ok(())
    }

    /// Load a persisted token from disk into the slot.
    ///
    /// Returns `Ok(true)` if a token was loaded. A missing session file is
    /// not an error, just an empty result.
    pub(crate) async fn load_persisted(&self) -> io::Result<bool> {
        let bytes = match tokio::fs::read(&self.inner.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };

        let file: SessionFile = serde_json::from_slice(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        *self.inner.token.write().await = Some(SecretString::from(file.token));
        Ok(true)
    }

    /// Remove the persisted session file. Missing files are fine.
    pub(crate) async fn clear_persisted(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.inner.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
