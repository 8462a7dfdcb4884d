//! Persistent auth token storage.
//!
//! The token is written to `<home>/token.json` as `{"token": "..."}` with
//! restricted permissions (0600). It is never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::paths;

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Somewhere a freshly issued token can be put.
pub trait TokenSink: Send + Sync {
    /// Stores `token`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn put(&self, token: &str) -> Result<()>;
}

#[derive(Serialize)]
struct TokenFile<'a> {
    token: &'a str,
}

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::at(paths::token_path())
    }
}

impl TokenStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSink for TokenStore {
    fn put(&self, token: &str) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut contents = serde_json::to_string_pretty(&TokenFile { token })
            .context("Failed to serialize token")?;
        contents.push('\n');

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
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        tracing::info!(path = %path.display(), "stored auth token");
        Ok(())
    }
}
