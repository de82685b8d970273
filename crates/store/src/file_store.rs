//! File-based session store: one pretty-printed JSON document.
//!
//! Storage location defaults to `~/.inkwise/session.json` (see
//! `inkwise-config`). The file holds the serialized session state, not the
//! export envelope. Writes go to a sibling temp file that is then renamed
//! over the original, so a crash mid-write leaves the previous session.

use async_trait::async_trait;
use inkwise_core::error::StoreError;
use inkwise_core::store::SessionStore;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file-backed session store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if content.trim().is_empty() {
            debug!(path = %self.path.display(), "Session file is empty");
            return Ok(None);
        }

        serde_json::from_str(&content).map(Some).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Session file is not valid JSON");
            StoreError::Corrupted(e.to_string())
        })
    }

    async fn save(&self, value: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Storage(format!("Failed to create session directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(value)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to write session file: {e}")))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to replace session file: {e}")))?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Storage(format!(
                "Failed to remove session file: {e}"
            ))),
        }
    }
}
