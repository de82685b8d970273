//! Session edits: patches and claim operations.
//!
//! Every function takes the current state by reference and returns a new
//! canonical state. Patches are routed back through the sanitizer so an
//! edit can never break an invariant.

use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::model::{Claim, SessionState};
use crate::sanitize::reconcile_with;
use serde_json::Value;
use tracing::debug;

/// Nested objects that are merged key by key instead of replaced.
const MERGED_SECTIONS: [&str; 2] = ["ui", "linkedin"];

/// Overlay a JSON patch on `state` and reconcile the result.
///
/// Top-level fields in the patch replace the current value; `ui` and
/// `linkedin` are merged so a patch like `{"linkedin": {"maxBullets": 3}}`
/// leaves the other options untouched. A non-object patch is a no-op.
pub fn apply_patch(state: &SessionState, patch: &Value, ids: &mut dyn IdGenerator) -> SessionState {
    let Some(patch) = patch.as_object() else {
        return state.clone();
    };
    let Ok(mut merged) = serde_json::to_value(state) else {
        return state.clone();
    };
    if let Some(target) = merged.as_object_mut() {
        for (key, value) in patch {
            match (target.get_mut(key), value) {
                (Some(Value::Object(existing)), Value::Object(fields))
                    if MERGED_SECTIONS.contains(&key.as_str()) =>
                {
                    for (field, v) in fields {
                        existing.insert(field.clone(), v.clone());
                    }
                }
                _ => {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
    }
    debug!(fields = patch.len(), "Applied session patch");
    reconcile_with(&merged, ids)
}

/// A fresh session, discarding everything.
pub fn reset(ids: &mut dyn IdGenerator) -> SessionState {
    SessionState::fresh(ids)
}

/// Append a claim. Returns the new state and the new claim's id.
pub fn add_claim(
    state: &SessionState,
    text: impl Into<String>,
    ids: &mut dyn IdGenerator,
) -> (SessionState, String) {
    let mut next = state.clone();
    let claim = Claim::new(ids.next_id(), text);
    let id = claim.id.clone();
    next.claims.push(claim);
    (next, id)
}

/// Remove a claim and its expression.
///
/// Removing the only claim leaves a fresh empty claim in its place.
pub fn remove_claim(state: &SessionState, id: &str, ids: &mut dyn IdGenerator) -> Result<SessionState> {
    let index = position(state, id)?;
    let mut next = state.clone();
    next.claims.remove(index);
    next.expressions.remove(id);
    if next.claims.is_empty() {
        next.claims.push(Claim::empty(ids));
    }
    Ok(next)
}

/// Move a claim by `offset` positions, stopping at either end.
pub fn move_claim(state: &SessionState, id: &str, offset: isize) -> Result<SessionState> {
    let from = position(state, id)?;
    let last = state.claims.len() - 1;
    let to = from.saturating_add_signed(offset).min(last);
    let mut next = state.clone();
    let claim = next.claims.remove(from);
    next.claims.insert(to, claim);
    Ok(next)
}

pub fn set_claim_text(state: &SessionState, id: &str, text: impl Into<String>) -> Result<SessionState> {
    let index = position(state, id)?;
    let mut next = state.clone();
    next.claims[index].text = text.into();
    Ok(next)
}

/// Set the expression paragraph for an existing claim.
pub fn set_expression(state: &SessionState, id: &str, text: impl Into<String>) -> Result<SessionState> {
    position(state, id)?;
    let mut next = state.clone();
    next.expressions.insert(id.to_string(), Value::String(text.into()));
    Ok(next)
}

/// Drop expression entries whose claim no longer exists.
pub fn prune_expressions(state: &SessionState) -> SessionState {
    let mut next = state.clone();
    next.expressions
        .retain(|id, _| state.claims.iter().any(|c| &c.id == id));
    next
}

fn position(state: &SessionState, id: &str) -> Result<usize> {
    state
        .claims
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| Error::ClaimNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::Phase;
    use crate::profile::ProfileKey;
    use serde_json::json;

    fn three_claims(ids: &mut SequentialIds) -> SessionState {
        reconcile_with(
            &json!({
                "claims": [
                    { "id": "a", "text": "Alpha" },
                    { "id": "b", "text": "Beta" },
                    { "id": "c", "text": "Gamma" }
                ],
                "expressions": { "a": "About alpha", "b": "About beta" }
            }),
            ids,
        )
    }

    #[test]
    fn patch_replaces_top_level_and_merges_sections() {
        let mut ids = SequentialIds::default();
        let state = three_claims(&mut ids);
        let next = apply_patch(
            &state,
            &json!({
                "intent": "New intent",
                "phase": "draft",
                "linkedin": { "maxBullets": 30, "includeBullets": true }
            }),
            &mut ids,
        );
        assert_eq!(next.intent, "New intent");
        assert_eq!(next.phase, Phase::Draft);
        assert_eq!(next.linkedin.max_bullets, 12);
        assert!(next.linkedin.include_bullets);
        assert_eq!(next.linkedin.bullet_intro, state.linkedin.bullet_intro);
        assert_eq!(next.claims, state.claims);
    }

    #[test]
    fn patch_cannot_break_invariants() {
        let mut ids = SequentialIds::default();
        let state = three_claims(&mut ids);
        let next = apply_patch(
            &state,
            &json!({ "claims": [], "outputProfile": "myspace", "ui": "flat" }),
            &mut ids,
        );
        assert_eq!(next.claims.len(), 1);
        assert_eq!(next.output_profile, ProfileKey::Linkedin);
        assert_eq!(next.ui.preset_id, "");
    }

    #[test]
    fn non_object_patch_is_a_no_op() {
        let mut ids = SequentialIds::default();
        let state = three_claims(&mut ids);
        assert_eq!(apply_patch(&state, &json!([1, 2]), &mut ids), state);
    }

    #[test]
    fn add_and_remove_claims() {
        let mut ids = SequentialIds::new("n");
        let state = three_claims(&mut ids);
        let (state, id) = add_claim(&state, "Delta", &mut ids);
        assert_eq!(id, "n1");
        assert_eq!(state.claims.len(), 4);

        let state = remove_claim(&state, "a", &mut ids).unwrap();
        assert_eq!(state.claims.len(), 3);
        assert!(!state.expressions.contains_key("a"));
        assert!(matches!(
            remove_claim(&state, "zzz", &mut ids),
            Err(Error::ClaimNotFound(_))
        ));
    }

    #[test]
    fn removing_the_last_claim_leaves_an_empty_one() {
        let mut ids = SequentialIds::new("n");
        let state = SessionState::fresh(&mut ids);
        let only = state.claims[0].id.clone();
        let state = remove_claim(&state, &only, &mut ids).unwrap();
        assert_eq!(state.claims.len(), 1);
        assert_ne!(state.claims[0].id, only);
        assert!(state.claims[0].text.is_empty());
    }

    #[test]
    fn move_claim_stops_at_the_edges() {
        let mut ids = SequentialIds::default();
        let state = three_claims(&mut ids);
        let order = |s: &SessionState| s.claims.iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        assert_eq!(order(&move_claim(&state, "a", 1).unwrap()), ["b", "a", "c"]);
        assert_eq!(order(&move_claim(&state, "a", 10).unwrap()), ["b", "c", "a"]);
        assert_eq!(order(&move_claim(&state, "c", -10).unwrap()), ["c", "a", "b"]);
        assert_eq!(order(&move_claim(&state, "b", 0).unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn edit_text_and_expression() {
        let mut ids = SequentialIds::default();
        let state = three_claims(&mut ids);
        let state = set_claim_text(&state, "c", "Gamma rays").unwrap();
        let state = set_expression(&state, "c", "All about gamma").unwrap();
        assert_eq!(state.find_claim("c").unwrap().text, "Gamma rays");
        assert_eq!(state.expression_text("c"), "All about gamma");
        assert!(set_expression(&state, "missing", "x").is_err());
    }

    #[test]
    fn prune_drops_orphans_only() {
        let mut ids = SequentialIds::default();
        let mut state = three_claims(&mut ids);
        state.expressions.insert("ghost".into(), json!("boo"));
        let pruned = prune_expressions(&state);
        assert_eq!(pruned.expressions.len(), 2);
        assert_eq!(pruned.orphaned_expressions(), 0);
    }
}
