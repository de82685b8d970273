//! Session schema: the strict gate for anything arriving from outside.
//!
//! Where the sanitizer in `inkwise-core` repairs, this crate rejects. It is
//! used for explicit file import: every structural problem is collected as
//! a [`SchemaIssue`] with a field path, and nothing is applied unless the
//! payload passes.
//!
//! ```text
//! raw JSON ──▶ extract_state_from_import ──▶ validate_export / validate_state
//!                                                   │
//!                                      ┌────────────┴────────────┐
//!                                      │ Ok: sanitizer → state   │
//!                                      │ Err: SchemaError issues │
//!                                      └─────────────────────────┘
//! ```

mod import;
mod validator;

pub use import::{create_session_export, export_json, extract_state_from_import, import_json};
pub use validator::{validate_export, validate_state};

use serde::Serialize;

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// Dotted field path, e.g. `state.claims[0].id`. Empty for the root.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All violations found in one payload.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid session: {}", join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    /// Whether any issue is reported at exactly `path`.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from importing a session file.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse session file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not parse session file: {0}")]
    Invalid(SchemaError),
}

impl ImportError {
    /// The schema issues behind the failure, if it got that far.
    pub fn issues(&self) -> &[SchemaIssue] {
        match self {
            ImportError::Invalid(e) => &e.issues,
            ImportError::Json(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_issue() {
        let err = SchemaError {
            issues: vec![
                SchemaIssue { path: "claims".into(), message: "must contain at least one claim".into() },
                SchemaIssue { path: String::new(), message: "expected an object".into() },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("claims: must contain at least one claim"));
        assert!(text.contains("(root): expected an object"));
        assert!(err.has_issue_at("claims"));
    }
}
