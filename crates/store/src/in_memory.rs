//! In-memory store: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use inkwise_core::error::StoreError;
use inkwise_core::store::SessionStore;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the saved session in a shared slot. Clones share the slot.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    slot: Arc<RwLock<Option<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded value, e.g. a hand-written or damaged session.
    pub fn with_value(value: Value) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(value))),
        }
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, value: &Value) -> Result<(), StoreError> {
        *self.slot.write().await = Some(value.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
