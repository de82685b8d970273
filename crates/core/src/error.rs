//! Error types for the Inkwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The sanitizer never fails, so these only cover edits and storage.

use thiserror::Error;

/// The top-level error type for Inkwise core operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Session edits ---
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    // --- Storage ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a [`crate::SessionStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored session is corrupted: {0}")]
    Corrupted(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
