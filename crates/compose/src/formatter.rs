//! Profile formatter: reshapes the base draft for the selected output profile.

use crate::splitter::split;
use inkwise_core::{Claim, ProfileKey, SessionState};

pub const EMAIL_SUBJECT_FALLBACK: &str = "Quick update";
pub const MEMO_TITLE_FALLBACK: &str = "Untitled memo";
/// Claims listed under the memo TL;DR.
pub const MEMO_TLDR_ITEMS: usize = 5;
/// Placed between posts of a thread.
pub const THREAD_SEPARATOR: &str = "\n\n---\n\n";

const DEFAULT_CHUNK_SIZE: usize = 280;

/// Format `base` for `state.output_profile`.
pub fn format(base: &str, state: &SessionState) -> String {
    match state.output_profile {
        ProfileKey::Linkedin | ProfileKey::Custom => base.to_string(),
        ProfileKey::Email => email(base, state),
        ProfileKey::Memo => memo(base, state),
        ProfileKey::Blog => blog(base, state),
        ProfileKey::Xthread => thread(base),
    }
}

/// Posts for the thread profile, before joining.
pub fn thread_posts(base: &str) -> Vec<String> {
    let limit = ProfileKey::Xthread
        .descriptor()
        .chunk_size
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    split(base, limit)
}

fn email(base: &str, state: &SessionState) -> String {
    let subject = match state.hook() {
        "" => EMAIL_SUBJECT_FALLBACK,
        hook => hook,
    };
    format!("Subject: {subject}\n\n{base}")
}

fn memo(base: &str, state: &SessionState) -> String {
    let title = match state.intent.trim() {
        "" => MEMO_TITLE_FALLBACK,
        intent => intent,
    };
    let tldr: Vec<String> = state
        .non_empty_claims()
        .take(MEMO_TLDR_ITEMS)
        .map(|c| format!("- {}", c.trimmed()))
        .collect();
    let tldr = if tldr.is_empty() {
        "-".to_string()
    } else {
        tldr.join("\n")
    };

    [
        format!("TITLE\n{title}"),
        format!("TL;DR\n{tldr}"),
        format!("DETAILS\n{base}"),
        "NEXT STEPS\n-".to_string(),
    ]
    .join("\n\n")
}

fn blog(base: &str, state: &SessionState) -> String {
    let mut parts: Vec<String> = Vec::new();
    let title = state.intent.trim();
    if !title.is_empty() {
        parts.push(format!("# {title}"));
    }

    let claims: Vec<&Claim> = state.non_empty_claims().collect();
    let has_body = claims
        .iter()
        .any(|c| !state.expression_text(&c.id).is_empty());

    if has_body {
        for claim in claims {
            match state.expression_text(&claim.id) {
                "" => parts.push(format!("## {}", claim.trimmed())),
                body => parts.push(format!("## {}\n\n{body}", claim.trimmed())),
            }
        }
    } else {
        parts.push(base.to_string());
    }

    parts.join("\n\n")
}

fn thread(base: &str) -> String {
    thread_posts(base).join(THREAD_SEPARATOR)
}
