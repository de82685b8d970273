//! Import resolution and export envelopes.

use crate::validator::{validate_export, validate_state};
use crate::{ImportError, SchemaError};
use chrono::{DateTime, Utc};
use inkwise_core::model::SESSION_VERSION;
use inkwise_core::{SessionExport, SessionState};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Wrap canonical state in a versioned export envelope.
pub fn create_session_export(state: &SessionState, exported_at: DateTime<Utc>) -> SessionExport {
    SessionExport {
        version: SESSION_VERSION.to_string(),
        exported_at,
        state: state.clone(),
    }
}

/// Pretty-printed export file contents.
pub fn export_json(state: &SessionState, exported_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&create_session_export(state, exported_at))
}

/// Parse file contents and resolve them into canonical state.
pub fn import_json(text: &str) -> Result<SessionState, ImportError> {
    let raw: Value = serde_json::from_str(text)?;
    extract_state_from_import(&raw)
}

/// Resolve arbitrary parsed JSON into canonical state, strictly.
///
/// Resolution order:
/// 1. a full export envelope;
/// 2. its nested `state`, whenever one is present, so a payload that carries
///    both shapes resolves to the nested one;
/// 3. the top-level object as a bare state (older files);
/// 4. otherwise fail with the issues of the closest match: the envelope when
///    a `version` is present, else the nested state, else the bare state.
pub fn extract_state_from_import(raw: &Value) -> Result<SessionState, ImportError> {
    let export_err = match validate_export(raw) {
        Ok(export) => {
            debug!(version = %export.version, "Imported session export");
            return Ok(export.state);
        }
        Err(e) => e,
    };

    let mut nested_err: Option<SchemaError> = None;
    if let Some(nested) = raw.get("state") {
        match validate_state(nested) {
            Ok(state) => {
                info!(
                    issues = export_err.issues.len(),
                    "Export envelope invalid, recovered nested state"
                );
                return Ok(state);
            }
            Err(e) => nested_err = Some(e),
        }
    }

    let bare_err = match validate_state(raw) {
        Ok(state) => {
            debug!("Imported bare session state");
            return Ok(state);
        }
        Err(e) => e,
    };

    let closest = if raw.get("version").is_some() {
        export_err
    } else if let Some(e) = nested_err {
        e
    } else {
        bare_err
    };
    warn!(issues = closest.issues.len(), "Session import rejected");
    Err(ImportError::Invalid(closest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwise_core::{ProfileKey, SequentialIds, reconcile_with};
    use serde_json::json;

    fn sample_state() -> SessionState {
        reconcile_with(
            &json!({
                "phase": "expression",
                "intent": "Q3 update",
                "claims": [{ "id": "a", "text": "Revenue up" }, { "id": "b", "text": "" }],
                "expressions": { "a": "Up 12% on last quarter.", "orphan": 5 },
                "outputProfile": "memo",
                "ui": { "presetId": "weekly-update" },
                "linkedin": { "maxBullets": 9, "includeSignature": true, "signature": "— Sam" }
            }),
            &mut SequentialIds::default(),
        )
    }

    #[test]
    fn export_import_round_trip() {
        let state = sample_state();
        let text = export_json(&state, Utc::now()).unwrap();
        assert_eq!(import_json(&text).unwrap(), state);
    }

    #[test]
    fn fresh_state_round_trips_too() {
        let state = SessionState::fresh(&mut SequentialIds::default());
        let raw = serde_json::to_value(create_session_export(&state, Utc::now())).unwrap();
        assert_eq!(extract_state_from_import(&raw).unwrap(), state);
    }

    #[test]
    fn bad_envelope_recovers_nested_state() {
        let raw = json!({
            "version": "inkwise:session:v1",
            "exportedAt": "not a date",
            "state": { "claims": [{ "id": "a", "text": "Kept" }], "outputProfile": "blog" }
        });
        let state = extract_state_from_import(&raw).unwrap();
        assert_eq!(state.claims[0].text, "Kept");
        assert_eq!(state.output_profile, ProfileKey::Blog);
    }

    #[test]
    fn bare_state_is_accepted() {
        let raw = json!({ "intent": "Old file", "claims": [{ "id": "a", "text": "x" }] });
        assert_eq!(extract_state_from_import(&raw).unwrap().intent, "Old file");
    }

    #[test]
    fn nested_state_without_version_is_accepted() {
        let raw = json!({ "state": { "claims": [{ "id": "a", "text": "x" }] } });
        assert_eq!(extract_state_from_import(&raw).unwrap().claims.len(), 1);
    }

    #[test]
    fn nested_state_wins_over_top_level_claims() {
        let raw = json!({
            "claims": [{ "id": "top", "text": "Outer" }],
            "state": { "claims": [{ "id": "nested", "text": "Inner" }] }
        });
        let state = extract_state_from_import(&raw).unwrap();
        assert_eq!(state.claims[0].id, "nested");
    }

    #[test]
    fn invalid_nested_state_falls_back_to_top_level() {
        let raw = json!({
            "claims": [{ "id": "top", "text": "Outer" }],
            "state": { "claims": [] }
        });
        assert_eq!(extract_state_from_import(&raw).unwrap().claims[0].id, "top");
    }

    #[test]
    fn empty_nested_claims_are_rejected() {
        let err = extract_state_from_import(&json!({ "state": { "claims": [] } })).unwrap_err();
        assert!(err.issues().iter().any(|i| i.path == "claims"));
        assert!(err.to_string().starts_with("could not parse session file"));
    }

    #[test]
    fn fully_malformed_file_reports_envelope_issues() {
        let raw = json!({ "version": 3, "state": "nope" });
        let err = extract_state_from_import(&raw).unwrap_err();
        assert!(err.issues().iter().any(|i| i.path == "version"));
        assert!(err.issues().iter().any(|i| i.path == "state"));
    }

    #[test]
    fn invalid_json_text_is_reported() {
        assert!(matches!(import_json("{ not json"), Err(ImportError::Json(_))));
    }

    #[test]
    fn export_envelope_carries_the_current_version() {
        let export = create_session_export(&sample_state(), Utc::now());
        assert_eq!(export.version, "inkwise:session:v1");
        let json = serde_json::to_value(&export).unwrap();
        assert!(json["exportedAt"].is_string());
        assert_eq!(json["state"]["outputProfile"], "memo");
    }
}
