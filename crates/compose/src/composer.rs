//! Base draft composer.
//!
//! Assembles the platform-agnostic draft, paragraph by paragraph:
//!
//! 1. **Hook**: hook override, else the intent
//! 2. **Bullets**: intro line plus up to `maxBullets` claims, when enabled
//! 3. **Body**: expression paragraphs; without any, the claims themselves
//!    (only when there is no hook), else a placeholder (again only without a hook)
//! 4. **CTA**, **signature**, **hashtags**, each when enabled and non-empty
//!
//! Paragraphs are separated by one blank line.

use inkwise_core::{Claim, SessionState, clamp_max_bullets};

/// Emitted when there is nothing at all to draft from.
pub const EMPTY_DRAFT_PLACEHOLDER: &str =
    "Your draft is empty. Add an intent or a few claims to get started.";

/// Compose the base draft for `state`.
pub fn compose_base(state: &SessionState) -> String {
    let cfg = &state.linkedin;
    let hook = state.hook();
    let claims: Vec<&str> = state.non_empty_claims().map(Claim::trimmed).collect();
    let max_items = usize::from(clamp_max_bullets(i64::from(cfg.max_bullets)));
    let mut paragraphs: Vec<String> = Vec::new();

    if !hook.is_empty() {
        paragraphs.push(hook.to_string());
    }

    if cfg.include_bullets && !claims.is_empty() {
        let intro = cfg.bullet_intro.trim();
        let mut lines: Vec<String> = Vec::with_capacity(max_items + 1);
        if !intro.is_empty() {
            lines.push(intro.to_string());
        }
        lines.extend(claims.iter().take(max_items).map(|c| format!("• {c}")));
        paragraphs.push(lines.join("\n"));
    }

    let body: Vec<&str> = state
        .non_empty_claims()
        .map(|c| state.expression_text(&c.id))
        .filter(|e| !e.is_empty())
        .collect();
    if !body.is_empty() {
        paragraphs.extend(body.into_iter().map(String::from));
    } else if hook.is_empty() && !claims.is_empty() {
        paragraphs.extend(claims.iter().take(max_items).map(|c| c.to_string()));
    } else if hook.is_empty() {
        paragraphs.push(EMPTY_DRAFT_PLACEHOLDER.to_string());
    }

    let closers = [
        (cfg.include_cta, &cfg.cta_text),
        (cfg.include_signature, &cfg.signature),
        (cfg.include_hashtags, &cfg.hashtags),
    ];
    for (enabled, text) in closers {
        let text = text.trim();
        if enabled && !text.is_empty() {
            paragraphs.push(text.to_string());
        }
    }

    paragraphs.join("\n\n").trim().to_string()
}
