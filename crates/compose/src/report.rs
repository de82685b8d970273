//! Draft report: the rendered text plus its budget usage.

use crate::composer::compose_base;
use crate::formatter::{format, thread_posts};
use inkwise_core::{ProfileKey, SessionState};
use serde::Serialize;
use tracing::debug;

/// A rendered draft measured against its profile.
#[derive(Debug, Clone, Serialize)]
pub struct DraftReport {
    pub profile: ProfileKey,
    pub label: &'static str,
    pub text: String,
    /// Characters in `text` (Unicode scalar values).
    pub chars: usize,
    pub max_chars: usize,
    pub over_limit: bool,
    /// Number of posts, for profiles that split into a thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<usize>,
}

impl DraftReport {
    /// Characters left before the profile budget (negative when over).
    pub fn remaining(&self) -> i64 {
        self.max_chars as i64 - self.chars as i64
    }
}

/// Render `state` for its own output profile.
pub fn render(state: &SessionState) -> DraftReport {
    let base = compose_base(state);
    let text = format(&base, state);
    let descriptor = state.output_profile.descriptor();
    let chars = text.chars().count();
    let posts = descriptor
        .chunk_size
        .map(|_| thread_posts(&base).len());

    debug!(
        profile = %descriptor.key,
        chars,
        max_chars = descriptor.max_chars,
        "Rendered draft"
    );

    DraftReport {
        profile: descriptor.key,
        label: descriptor.label,
        text,
        chars,
        max_chars: descriptor.max_chars,
        over_limit: chars > descriptor.max_chars,
        posts,
    }
}

/// Render `state` as if `profile` were selected, without changing the session.
pub fn render_as(state: &SessionState, profile: ProfileKey) -> DraftReport {
    if state.output_profile == profile {
        return render(state);
    }
    let mut preview = state.clone();
    preview.output_profile = profile;
    render(&preview)
}
