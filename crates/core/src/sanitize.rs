//! State sanitizer: reconciles arbitrary input into canonical session state.
//!
//! [`reconcile`] is total: fresh defaults, partial patches, stored sessions
//! and foreign files all come out as a [`SessionState`] that satisfies every
//! invariant of the model. Nothing is reported; malformed fields are simply
//! replaced by their defaults.
//!
//! Fields are copied one by one from an allowlist into a freshly built
//! record, so unknown keys in the input never reach canonical state.

use crate::ids::{IdGenerator, UuidIds};
use crate::model::{
    Claim, DEFAULT_MAX_BULLETS, LinkedinConfig, MAX_BULLETS, MIN_BULLETS, Phase,
    SESSION_VERSION_PREFIX, SessionState, UiState,
};
use crate::profile::ProfileKey;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Reconcile `raw` into canonical state using random claim ids.
pub fn reconcile(raw: &Value) -> SessionState {
    reconcile_with(raw, &mut UuidIds)
}

/// Reconcile `raw` into canonical state, drawing fresh claim ids from `ids`.
pub fn reconcile_with(raw: &Value, ids: &mut dyn IdGenerator) -> SessionState {
    let empty = Map::new();
    let candidate = unwrap_envelope(raw).as_object().unwrap_or(&empty);

    SessionState {
        phase: candidate
            .get("phase")
            .and_then(Value::as_str)
            .and_then(Phase::parse)
            .unwrap_or_default(),
        intent: string_field(candidate, "intent").unwrap_or_default(),
        claims: repair_claims(candidate.get("claims"), ids),
        expressions: repair_expressions(candidate.get("expressions")),
        output_profile: candidate
            .get("outputProfile")
            .and_then(Value::as_str)
            .and_then(ProfileKey::parse)
            .unwrap_or_default(),
        ui: repair_ui(candidate.get("ui")),
        linkedin: repair_linkedin(candidate.get("linkedin")),
    }
}

/// Clamp any integer into the allowed bullet range.
pub fn clamp_max_bullets(n: i64) -> u8 {
    n.clamp(i64::from(MIN_BULLETS), i64::from(MAX_BULLETS)) as u8
}

/// Substitute the nested `state` of an `inkwise:session:*` envelope.
///
/// Envelopes with any other version prefix are left alone so foreign
/// formats degrade to their top-level fields.
fn unwrap_envelope(raw: &Value) -> &Value {
    let is_session_envelope = raw
        .get("version")
        .and_then(Value::as_str)
        .is_some_and(|v| v.starts_with(SESSION_VERSION_PREFIX));
    match raw.get("state") {
        Some(state) if is_session_envelope && state.is_object() => state,
        _ => raw,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn repair_claims(value: Option<&Value>, ids: &mut dyn IdGenerator) -> Vec<Claim> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return vec![Claim::empty(ids)],
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut regenerated = 0usize;
    let claims = entries
        .iter()
        .map(|entry| {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty() && !seen.contains(*id))
                .map(str::to_string)
                .unwrap_or_else(|| {
                    regenerated += 1;
                    unused_id(ids, &seen)
                });
            seen.insert(id.clone());
            let text = entry
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Claim { id, text }
        })
        .collect();

    if regenerated > 0 {
        debug!(regenerated, "Assigned fresh ids to claims");
    }
    claims
}

/// Next generated id not already taken by an earlier claim.
fn unused_id(ids: &mut dyn IdGenerator, seen: &HashSet<String>) -> String {
    loop {
        let id = ids.next_id();
        if !seen.contains(&id) {
            return id;
        }
    }
}

fn repair_expressions(value: Option<&Value>) -> BTreeMap<String, Value> {
    match value {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        _ => BTreeMap::new(),
    }
}

fn repair_ui(value: Option<&Value>) -> UiState {
    let Some(ui) = value.and_then(Value::as_object) else {
        return UiState::default();
    };
    UiState {
        preset_id: string_field(ui, "presetId").unwrap_or_default(),
    }
}

fn repair_linkedin(value: Option<&Value>) -> LinkedinConfig {
    let defaults = LinkedinConfig::default();
    let Some(cfg) = value.and_then(Value::as_object) else {
        return defaults;
    };
    LinkedinConfig {
        hook_override: string_field(cfg, "hookOverride").unwrap_or(defaults.hook_override),
        include_bullets: bool_field(cfg, "includeBullets").unwrap_or(defaults.include_bullets),
        bullet_intro: string_field(cfg, "bulletIntro").unwrap_or(defaults.bullet_intro),
        max_bullets: cfg
            .get("maxBullets")
            .and_then(parse_integer)
            .map(clamp_max_bullets)
            .unwrap_or(DEFAULT_MAX_BULLETS),
        include_cta: bool_field(cfg, "includeCTA").unwrap_or(defaults.include_cta),
        cta_text: string_field(cfg, "ctaText").unwrap_or(defaults.cta_text),
        include_hashtags: bool_field(cfg, "includeHashtags").unwrap_or(defaults.include_hashtags),
        hashtags: string_field(cfg, "hashtags").unwrap_or(defaults.hashtags),
        include_signature: bool_field(cfg, "includeSignature")
            .unwrap_or(defaults.include_signature),
        signature: string_field(cfg, "signature").unwrap_or(defaults.signature),
    }
}

/// Integer reading of a number or numeric string.
///
/// Fractions truncate toward zero; strings are read by their leading
/// integer (`"7 bullets"` → 7). Anything else is `None`.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use serde_json::json;

    fn run(raw: Value) -> SessionState {
        reconcile_with(&raw, &mut SequentialIds::new("gen-"))
    }

    #[test]
    fn empty_object_yields_defaults() {
        let state = run(json!({}));
        assert_eq!(state.phase, Phase::Intent);
        assert_eq!(state.intent, "");
        assert_eq!(state.claims, vec![Claim::new("gen-1", "")]);
        assert!(state.expressions.is_empty());
        assert_eq!(state.output_profile, ProfileKey::Linkedin);
        assert_eq!(state.ui, UiState::default());
        assert_eq!(state.linkedin, LinkedinConfig::default());
    }

    #[test]
    fn empty_claims_array_falls_back_to_one_claim() {
        let state = run(json!({ "claims": [] }));
        assert_eq!(state.claims.len(), 1);
        assert_eq!(state.claims[0].text, "");
        assert!(!state.claims[0].id.is_empty());
    }

    #[test]
    fn non_object_inputs_become_defaults() {
        for raw in [Value::Null, json!(42), json!("state"), json!([1, 2, 3]), json!(true)] {
            let state = run(raw);
            assert_eq!(state.claims.len(), 1);
            assert_eq!(state.phase, Phase::Intent);
        }
    }

    #[test]
    fn claims_keep_length_and_gain_ids() {
        let state = run(json!({
            "claims": [
                { "id": "a", "text": "First" },
                null,
                { "id": "", "text": 17 },
                { "text": "No id" },
                "just a string"
            ]
        }));
        assert_eq!(state.claims.len(), 5);
        assert_eq!(state.claims[0], Claim::new("a", "First"));
        assert_eq!(state.claims[1], Claim::new("gen-1", ""));
        assert_eq!(state.claims[2], Claim::new("gen-2", ""));
        assert_eq!(state.claims[3], Claim::new("gen-3", "No id"));
        assert_eq!(state.claims[4], Claim::new("gen-4", ""));
    }

    #[test]
    fn duplicate_claim_ids_are_reassigned() {
        let state = run(json!({
            "claims": [{ "id": "x", "text": "one" }, { "id": "x", "text": "two" }]
        }));
        assert_eq!(state.claims[0].id, "x");
        assert_eq!(state.claims[1].id, "gen-1");
        assert_eq!(state.claims[1].text, "two");
    }

    #[test]
    fn expressions_must_be_a_plain_object() {
        assert!(run(json!({ "expressions": ["a"] })).expressions.is_empty());
        assert!(run(json!({ "expressions": "a" })).expressions.is_empty());
        let state = run(json!({ "expressions": { "a": "Para", "b": 3 } }));
        assert_eq!(state.expressions.len(), 2);
        assert_eq!(state.expressions["b"], json!(3));
    }

    #[test]
    fn max_bullets_is_parsed_and_clamped() {
        let cases = [
            (json!(3), 3),
            (json!(0), 1),
            (json!(-4), 1),
            (json!(99), 12),
            (json!(7.9), 7),
            (json!("8"), 8),
            (json!(" 10 bullets"), 10),
            (json!("many"), 5),
            (json!(null), 5),
            (json!(true), 5),
            (json!("99999999999999999999999"), 12),
        ];
        for (raw, expected) in cases {
            let state = run(json!({ "linkedin": { "maxBullets": raw } }));
            assert_eq!(state.linkedin.max_bullets, expected, "input {raw}");
        }
    }

    #[test]
    fn clamp_keeps_in_range_values() {
        for n in 1..=12 {
            assert_eq!(i64::from(clamp_max_bullets(n)), n);
        }
        assert_eq!(clamp_max_bullets(i64::MIN), 1);
        assert_eq!(clamp_max_bullets(i64::MAX), 12);
    }

    #[test]
    fn unknown_enums_fall_back() {
        let state = run(json!({ "phase": "publish", "outputProfile": "tiktok" }));
        assert_eq!(state.phase, Phase::Intent);
        assert_eq!(state.output_profile, ProfileKey::Linkedin);

        let state = run(json!({ "phase": "draft", "outputProfile": "memo" }));
        assert_eq!(state.phase, Phase::Draft);
        assert_eq!(state.output_profile, ProfileKey::Memo);
    }

    #[test]
    fn nested_objects_merge_per_field() {
        let state = run(json!({
            "ui": { "presetId": 5 },
            "linkedin": { "includeBullets": true, "hashtags": ["#a"], "ctaText": "Call me" }
        }));
        assert_eq!(state.ui.preset_id, "");
        assert!(state.linkedin.include_bullets);
        assert_eq!(state.linkedin.hashtags, "");
        assert_eq!(state.linkedin.cta_text, "Call me");
        assert_eq!(state.linkedin.bullet_intro, "Key points:");
    }

    #[test]
    fn session_envelope_is_unwrapped() {
        let state = run(json!({
            "version": "inkwise:session:v1",
            "exportedAt": "2026-01-01T00:00:00Z",
            "state": { "intent": "Nested", "outputProfile": "blog" }
        }));
        assert_eq!(state.intent, "Nested");
        assert_eq!(state.output_profile, ProfileKey::Blog);
    }

    #[test]
    fn foreign_envelope_is_not_unwrapped() {
        let state = run(json!({
            "version": "other:v1",
            "intent": "Top level",
            "state": { "intent": "Nested" }
        }));
        assert_eq!(state.intent, "Top level");
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let state = run(json!({ "intent": "x", "__proto__": { "admin": true }, "extra": 1 }));
        let json = serde_json::to_value(&state).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys.len(),
            7,
            "only the allowlisted fields should survive: {keys:?}"
        );
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn generated_ids_skip_ids_already_in_use() {
        let state = reconcile_with(
            &json!({ "claims": [{ "id": "id-1", "text": "a" }, { "text": "b" }] }),
            &mut SequentialIds::default(),
        );
        let ids: Vec<&str> = state.claims.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["id-1", "id-2"]);
    }

    #[test]
    fn generated_ids_stay_unique_across_duplicates() {
        let state = run(json!({
            "claims": [{ "id": "gen-1" }, {}, { "id": "gen-1" }, { "id": "gen-3" }]
        }));
        let ids: HashSet<&str> = state.claims.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(state.claims[0].id, "gen-1");
        assert_eq!(state.claims[1].id, "gen-2");
    }

    #[test]
    fn reconcile_is_idempotent() {
        let inputs = [
            json!({}),
            json!({ "claims": [null, { "id": "k", "text": 1 }], "linkedin": { "maxBullets": "40" } }),
            json!({ "version": "inkwise:session:v3", "state": { "phase": "expression" } }),
            json!("garbage"),
            json!({ "claims": [{ "id": "gen-1" }, {}, { "id": "gen-1", "text": "dup" }, { "id": "" }] }),
            json!({ "claims": [{ "id": "x", "text": "a" }, { "id": "x", "text": "b" }] }),
        ];
        for raw in inputs {
            let once = run(raw);
            let twice = run(serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }
}
