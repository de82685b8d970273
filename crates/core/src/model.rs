//! Session domain types.
//!
//! A session flows through the whole system as a plain value:
//! raw input → sanitizer → [`SessionState`] → composer → formatter → draft text.
//! Field names serialize in camelCase so exported files stay compatible
//! with the browser app that shares the format.

use crate::ids::IdGenerator;
use crate::profile::ProfileKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix shared by every session export version string.
pub const SESSION_VERSION_PREFIX: &str = "inkwise:session:";

/// Version written by this build.
pub const SESSION_VERSION: &str = "inkwise:session:v1";

pub const MIN_BULLETS: u8 = 1;
pub const MAX_BULLETS: u8 = 12;
pub const DEFAULT_MAX_BULLETS: u8 = 5;

/// Where the writer currently is. A position marker, never a gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Intent,
    Structure,
    Expression,
    Draft,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Intent, Phase::Structure, Phase::Expression, Phase::Draft];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intent" => Some(Self::Intent),
            "structure" => Some(Self::Structure),
            "expression" => Some(Self::Expression),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intent => "intent",
            Self::Structure => "structure",
            Self::Expression => "expression",
            Self::Draft => "draft",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete point supporting the intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    /// Stored as typed; trimmed only when consumed.
    pub text: String,
}

impl Claim {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// An empty claim carrying a fresh id.
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        Self::new(ids.next_id(), "")
    }

    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// UI memory that travels with the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Last quick-start preset the user picked.
    pub preset_id: String,
}

/// Hook, bullets, CTA, hashtags and signature options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinConfig {
    pub hook_override: String,
    pub include_bullets: bool,
    pub bullet_intro: String,
    /// Always within `[MIN_BULLETS, MAX_BULLETS]` once sanitized.
    pub max_bullets: u8,
    #[serde(rename = "includeCTA")]
    pub include_cta: bool,
    pub cta_text: String,
    pub include_hashtags: bool,
    pub hashtags: String,
    pub include_signature: bool,
    pub signature: String,
}

impl Default for LinkedinConfig {
    fn default() -> Self {
        Self {
            hook_override: String::new(),
            include_bullets: false,
            bullet_intro: "Key points:".into(),
            max_bullets: DEFAULT_MAX_BULLETS,
            include_cta: false,
            cta_text: "What do you think? Share your take below.".into(),
            include_hashtags: false,
            hashtags: String::new(),
            include_signature: false,
            signature: String::new(),
        }
    }
}

/// The aggregate root of a writing session.
///
/// Canonical values come only from [`crate::sanitize::reconcile`]; the
/// fields are public so callers can read them, but edits should go through
/// [`crate::session`] so the invariants are re-established.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub intent: String,
    /// Never empty.
    pub claims: Vec<Claim>,
    /// Claim id → paragraph. Entries for removed claims are tolerated, and
    /// values are kept as supplied; non-strings read as empty text.
    pub expressions: BTreeMap<String, serde_json::Value>,
    pub output_profile: ProfileKey,
    pub ui: UiState,
    pub linkedin: LinkedinConfig,
}

impl SessionState {
    /// A brand-new session with one empty claim.
    pub fn fresh(ids: &mut dyn IdGenerator) -> Self {
        Self {
            phase: Phase::default(),
            intent: String::new(),
            claims: vec![Claim::empty(ids)],
            expressions: BTreeMap::new(),
            output_profile: ProfileKey::default(),
            ui: UiState::default(),
            linkedin: LinkedinConfig::default(),
        }
    }

    /// Claims whose trimmed text is non-empty, in order.
    pub fn non_empty_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|c| !c.is_blank())
    }

    /// Trimmed expression text for a claim, or `""` when missing or not a string.
    pub fn expression_text(&self, claim_id: &str) -> &str {
        self.expressions
            .get(claim_id)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or("")
    }

    /// Trimmed hook override, falling back to the trimmed intent.
    pub fn hook(&self) -> &str {
        let hook = self.linkedin.hook_override.trim();
        if hook.is_empty() {
            self.intent.trim()
        } else {
            hook
        }
    }

    pub fn find_claim(&self, id: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.id == id)
    }

    /// Number of expression entries whose claim no longer exists.
    pub fn orphaned_expressions(&self) -> usize {
        self.expressions
            .keys()
            .filter(|id| self.find_claim(id).is_none())
            .count()
    }
}

/// Versioned envelope used for file export and backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub state: SessionState,
}
