//! Strict validation of session payloads.
//!
//! Rules:
//!
//! ```text
//! export.version      string matching ^inkwise:session:v\d+$
//! export.exportedAt   RFC 3339 timestamp
//! export.state        a valid state
//! state.claims        required, non-empty array of {id: non-empty unique string, text: string}
//! state.phase         intent | structure | expression | draft
//! state.outputProfile linkedin | xthread | email | memo | blog | custom
//! state.linkedin.maxBullets  integer in [1, 12]
//! ```
//!
//! Other known fields are optional but must have the right JSON type when
//! present. Unknown fields are ignored; they never reach canonical state.

use crate::{SchemaError, SchemaIssue};
use chrono::{DateTime, Utc};
use inkwise_core::model::{MAX_BULLETS, MIN_BULLETS, SESSION_VERSION_PREFIX};
use inkwise_core::{PROFILES, Phase, ProfileKey, SessionExport, SessionState, reconcile};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

const VERSION_PATTERN: &str = r"^inkwise:session:v\d+$";

const LINKEDIN_STRINGS: [&str; 5] = ["hookOverride", "bulletIntro", "ctaText", "hashtags", "signature"];
const LINKEDIN_FLAGS: [&str; 4] = ["includeBullets", "includeCTA", "includeHashtags", "includeSignature"];

/// Validate a full export envelope.
pub fn validate_export(raw: &Value) -> Result<SessionExport, SchemaError> {
    let mut issues = Issues::default();
    let Some(obj) = raw.as_object() else {
        issues.push("", "expected an object");
        return Err(issues.into_error());
    };

    let version = match obj.get("version") {
        None => {
            issues.push("version", "is required");
            None
        }
        Some(Value::String(v)) if version_matches(v) => Some(v.clone()),
        Some(Value::String(_)) => {
            issues.push(
                "version",
                format!("must match {SESSION_VERSION_PREFIX}v<N>"),
            );
            None
        }
        Some(_) => {
            issues.push("version", "expected a string");
            None
        }
    };

    let exported_at = match obj.get("exportedAt") {
        None => {
            issues.push("exportedAt", "is required");
            None
        }
        Some(Value::String(ts)) => match DateTime::parse_from_rfc3339(ts) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(_) => {
                issues.push("exportedAt", "must be an ISO-8601 timestamp");
                None
            }
        },
        Some(_) => {
            issues.push("exportedAt", "expected a string");
            None
        }
    };

    match obj.get("state") {
        None => issues.push("state", "is required"),
        Some(state) => check_state(state, "state", &mut issues),
    }

    issues.finish()?;
    match (version, exported_at, obj.get("state")) {
        (Some(version), Some(exported_at), Some(state)) => Ok(SessionExport {
            version,
            exported_at,
            state: canonical(state),
        }),
        // Every `None` above recorded an issue, so finish() already returned.
        _ => Err(SchemaError { issues: Vec::new() }),
    }
}

/// Validate a bare session state.
pub fn validate_state(raw: &Value) -> Result<SessionState, SchemaError> {
    let mut issues = Issues::default();
    check_state(raw, "", &mut issues);
    issues.finish()?;
    Ok(canonical(raw))
}

/// Canonical form of an already-validated state.
fn canonical(state: &Value) -> SessionState {
    // A stray `version` key must not make the sanitizer treat this as an envelope.
    let mut bare = state.clone();
    if let Some(obj) = bare.as_object_mut() {
        obj.remove("version");
    }
    reconcile(&bare)
}

fn version_matches(version: &str) -> bool {
    Regex::new(VERSION_PATTERN).is_ok_and(|re| re.is_match(version))
}

fn check_state(value: &Value, prefix: &str, issues: &mut Issues) {
    let Some(obj) = value.as_object() else {
        issues.push(prefix, "expected an object");
        return;
    };

    check_claims(obj.get("claims"), &join(prefix, "claims"), issues);

    if let Some(phase) = obj.get("phase")
        && phase.as_str().and_then(Phase::parse).is_none()
    {
        issues.push(join(prefix, "phase"), one_of(Phase::ALL.map(Phase::as_str)));
    }

    if let Some(profile) = obj.get("outputProfile")
        && profile.as_str().and_then(ProfileKey::parse).is_none()
    {
        issues.push(
            join(prefix, "outputProfile"),
            one_of(PROFILES.iter().map(|p| p.key.as_str())),
        );
    }

    expect_optional(obj, "intent", prefix, Value::is_string, "expected a string", issues);
    expect_optional(obj, "expressions", prefix, Value::is_object, "expected an object", issues);

    match obj.get("ui") {
        None => {}
        Some(Value::Object(ui)) => {
            let path = join(prefix, "ui");
            expect_optional(ui, "presetId", &path, Value::is_string, "expected a string", issues);
        }
        Some(_) => issues.push(join(prefix, "ui"), "expected an object"),
    }

    match obj.get("linkedin") {
        None => {}
        Some(Value::Object(cfg)) => check_linkedin(cfg, &join(prefix, "linkedin"), issues),
        Some(_) => issues.push(join(prefix, "linkedin"), "expected an object"),
    }
}

fn check_claims(value: Option<&Value>, path: &str, issues: &mut Issues) {
    let entries = match value {
        None => return issues.push(path, "is required"),
        Some(Value::Array(entries)) => entries,
        Some(_) => return issues.push(path, "expected an array"),
    };
    if entries.is_empty() {
        return issues.push(path, "must contain at least one claim");
    }

    let mut seen = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = format!("{path}[{i}]");
        let Some(claim) = entry.as_object() else {
            issues.push(entry_path, "expected an object");
            continue;
        };
        match claim.get("id") {
            None => issues.push(format!("{entry_path}.id"), "is required"),
            Some(Value::String(id)) if id.is_empty() => {
                issues.push(format!("{entry_path}.id"), "must not be empty")
            }
            Some(Value::String(id)) => {
                if !seen.insert(id.as_str()) {
                    issues.push(format!("{entry_path}.id"), format!("duplicate claim id '{id}'"));
                }
            }
            Some(_) => issues.push(format!("{entry_path}.id"), "expected a string"),
        }
        match claim.get("text") {
            None => issues.push(format!("{entry_path}.text"), "is required"),
            Some(Value::String(_)) => {}
            Some(_) => issues.push(format!("{entry_path}.text"), "expected a string"),
        }
    }
}

fn check_linkedin(cfg: &Map<String, Value>, path: &str, issues: &mut Issues) {
    for key in LINKEDIN_STRINGS {
        expect_optional(cfg, key, path, Value::is_string, "expected a string", issues);
    }
    for key in LINKEDIN_FLAGS {
        expect_optional(cfg, key, path, Value::is_boolean, "expected a boolean", issues);
    }
    if let Some(max) = cfg.get("maxBullets") {
        let in_range = as_integer(max)
            .is_some_and(|n| (i64::from(MIN_BULLETS)..=i64::from(MAX_BULLETS)).contains(&n));
        if !in_range {
            issues.push(
                join(path, "maxBullets"),
                format!("must be an integer between {MIN_BULLETS} and {MAX_BULLETS}"),
            );
        }
    }
}

/// Integers only: `3` and `3.0` pass, `3.5` and `"3"` do not.
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn expect_optional(
    obj: &Map<String, Value>,
    key: &str,
    prefix: &str,
    check: fn(&Value) -> bool,
    message: &str,
    issues: &mut Issues,
) {
    if let Some(value) = obj.get(key)
        && !check(value)
    {
        issues.push(join(prefix, key), message);
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn one_of<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    format!("must be one of {}", values.into_iter().collect::<Vec<_>>().join(", "))
}

/// Issue collector.
#[derive(Default)]
struct Issues(Vec<SchemaIssue>);

impl Issues {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(SchemaIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn finish(&mut self) -> Result<(), SchemaError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(SchemaError {
                issues: std::mem::take(&mut self.0),
            })
        }
    }

    fn into_error(self) -> SchemaError {
        SchemaError { issues: self.0 }
    }
}
