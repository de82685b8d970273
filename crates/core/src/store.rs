//! Session store trait: the key-value persistence contract.
//!
//! A store holds exactly one serialized [`SessionState`] (not the export
//! envelope). Stores hand back raw JSON; the sanitizer decides what it
//! means, so a half-written or hand-edited file still restores.

use crate::error::StoreError;
use crate::ids::IdGenerator;
use crate::model::SessionState;
use crate::sanitize::reconcile_with;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Implementations: file (JSON on disk), in-memory (for testing).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Read the stored value. `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> std::result::Result<Option<Value>, StoreError>;

    /// Replace the stored value.
    async fn save(&self, value: &Value) -> std::result::Result<(), StoreError>;

    /// Forget the stored value.
    async fn clear(&self) -> std::result::Result<(), StoreError>;
}

/// Load and reconcile the stored session.
///
/// Absence and corruption both yield a fresh session; corruption is logged.
pub async fn restore(store: &dyn SessionStore, ids: &mut dyn IdGenerator) -> SessionState {
    restore_or(store, ids, SessionState::fresh).await
}

/// Like [`restore`], but builds the fallback session with `fresh`.
pub async fn restore_or<F>(store: &dyn SessionStore, ids: &mut dyn IdGenerator, fresh: F) -> SessionState
where
    F: FnOnce(&mut dyn IdGenerator) -> SessionState + Send,
{
    match store.load().await {
        Ok(Some(value)) => reconcile_with(&value, ids),
        Ok(None) => {
            debug!(store = store.name(), "No stored session, starting fresh");
            fresh(ids)
        }
        Err(e) => {
            warn!(store = store.name(), error = %e, "Stored session unreadable, starting fresh");
            fresh(ids)
        }
    }
}

/// Serialize and save canonical state.
pub async fn persist(store: &dyn SessionStore, state: &SessionState) -> std::result::Result<(), StoreError> {
    let value = serde_json::to_value(state)?;
    store.save(&value).await
}
