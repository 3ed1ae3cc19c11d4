//! Session credential storage.
//!
//! The credential is an opaque bearer token issued by `POST /auth/login`,
//! persisted at `${GBX_HOME}/credentials.json` with restricted permissions
//! (0600). Absence of the file is the canonical logged-out state. Tokens
//! are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk credential format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
}

/// In-memory session credential backed by a JSON file.
///
/// Reads happen against the in-memory value only; `set` and `clear` keep
/// memory and disk in step.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Opens the store at the default credentials path.
    pub fn open() -> Self {
        Self::open_at(paths::credentials_path())
    }

    /// Opens a store backed by `path`, reading any persisted credential.
    ///
    /// A missing or unreadable file is the absent credential, not an error.
    pub fn open_at(path: PathBuf) -> Self {
        let token = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<StoredCredential>(&contents) {
                Ok(stored) if !stored.token.is_empty() => Some(stored.token),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(
                        "ignoring malformed credential file {}: {err}",
                        path.display()
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path,
            token: RwLock::new(token),
        }
    }

    /// Returns whether a credential is currently held. No I/O.
    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns a copy of the current credential, if any. No I/O.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a new credential in memory and on disk.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the file cannot be written.
    pub fn set(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Session token cannot be empty");
        }

        let contents = serde_json::to_string_pretty(&StoredCredential {
            token: token.to_string(),
        })
        .context("Failed to serialize credential")?;
        write_restricted(&self.path, &contents)?;

        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    /// Removes the credential from memory and disk. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }

    /// Returns the path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `contents` to `path` with restricted permissions (0600).
fn write_restricted(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
