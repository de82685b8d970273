//! # Inkwise Core
//!
//! The session model every other Inkwise crate works against: claims,
//! expressions, output profiles and the LinkedIn-style draft options, plus
//! the lenient [`sanitize::reconcile`] function that turns arbitrary input
//! into canonical state.
//!
//! ## Design Philosophy
//!
//! Nothing in this crate performs I/O. State goes in as a value and comes
//! back out as a new value:
//! - The sanitizer is the only producer of canonical [`SessionState`]
//! - Edits are expressed as patches or small operations in [`session`]
//! - Persistence is a trait ([`SessionStore`]) implemented elsewhere

pub mod error;
pub mod ids;
pub mod model;
pub mod profile;
pub mod sanitize;
pub mod session;
pub mod preset;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, StoreError};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use model::{Claim, LinkedinConfig, Phase, SessionExport, SessionState, UiState};
pub use profile::{OutputProfile, ProfileKey, PROFILES};
pub use sanitize::{clamp_max_bullets, reconcile, reconcile_with};
pub use preset::{Preset, PRESETS};
pub use store::SessionStore;
