//! Subcommand implementations and the shared session workspace.

pub mod claim;
pub mod draft;
pub mod edit;
pub mod init;
pub mod preset;
pub mod status;
pub mod transfer;

use inkwise_config::AppConfig;
use inkwise_core::store::{persist, restore_or};
use inkwise_core::{Error, SessionState, StoreError, UuidIds};
use inkwise_store::FileStore;
use std::path::Path;

/// Result type shared by every command handler.
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded configuration plus the session store it points at.
pub struct Workspace {
    pub config: AppConfig,
    store: FileStore,
    pub ids: UuidIds,
}

impl Workspace {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
        let store = FileStore::new(config.session_path());
        Ok(Self {
            config,
            store,
            ids: UuidIds,
        })
    }

    pub fn session_path(&self) -> &Path {
        self.store.path()
    }

    /// A new session using the configured default profile.
    pub fn fresh(&mut self) -> SessionState {
        let mut state = SessionState::fresh(&mut self.ids);
        state.output_profile = self.config.draft.profile();
        state
    }

    /// The stored session, or a fresh one when there is none.
    pub async fn load(&mut self) -> SessionState {
        let profile = self.config.draft.profile();
        restore_or(&self.store, &mut self.ids, move |ids| {
            let mut state = SessionState::fresh(ids);
            state.output_profile = profile;
            state
        })
        .await
    }

    pub async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        persist(&self.store, state).await
    }
}

/// Resolve a claim reference: a 1-based position or a claim id.
pub fn resolve_claim(state: &SessionState, reference: &str) -> Result<String, Error> {
    if let Ok(n) = reference.parse::<usize>()
        && (1..=state.claims.len()).contains(&n)
    {
        return Ok(state.claims[n - 1].id.clone());
    }
    state
        .find_claim(reference)
        .map(|c| c.id.clone())
        .ok_or_else(|| Error::ClaimNotFound(reference.to_string()))
}

/// First `max` characters of `text` on one line, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.trim().replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
