//! Quick-start presets.
//!
//! Each preset is a seed session that is loaded through the sanitizer like
//! any other input, with `ui.presetId` recording which one was picked.

use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::model::SessionState;
use crate::sanitize::reconcile_with;
use serde_json::{Value, json};

/// Catalogue entry for a preset.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "product-launch",
        label: "Product launch",
        description: "Announce a release on LinkedIn with bullets and a call to action.",
    },
    Preset {
        id: "weekly-update",
        label: "Weekly update",
        description: "A short status email for the team.",
    },
    Preset {
        id: "lessons-thread",
        label: "Lessons learned thread",
        description: "A numbered X thread built from several claims.",
    },
];

/// Load a preset as canonical state.
pub fn load_preset(id: &str, ids: &mut dyn IdGenerator) -> Result<SessionState> {
    let mut seed = seed(id).ok_or_else(|| Error::UnknownPreset(id.to_string()))?;
    seed["ui"] = json!({ "presetId": id });
    Ok(reconcile_with(&seed, ids))
}

fn seed(id: &str) -> Option<Value> {
    let seed = match id {
        "product-launch" => json!({
            "phase": "draft",
            "intent": "We just shipped offline mode.",
            "claims": [
                { "id": "launch-1", "text": "Drafts now sync when you reconnect" },
                { "id": "launch-2", "text": "Nothing is lost if the tab closes" },
                { "id": "launch-3", "text": "It works on every plan" }
            ],
            "expressions": {
                "launch-1": "Write on a plane, on a train, anywhere. Your edits wait locally and sync the moment you are back online.",
                "launch-2": "Every keystroke is saved to the device first, so a crash or an accidental close never costs you a paragraph."
            },
            "outputProfile": "linkedin",
            "linkedin": {
                "includeBullets": true,
                "bulletIntro": "What changes for you:",
                "maxBullets": 3,
                "includeCTA": true,
                "ctaText": "Try it today and tell us what you think.",
                "includeHashtags": true,
                "hashtags": "#productivity #writing"
            }
        }),
        "weekly-update" => json!({
            "phase": "expression",
            "intent": "Week 42 status",
            "claims": [
                { "id": "week-1", "text": "Import is feature complete" },
                { "id": "week-2", "text": "Thread export needs review" }
            ],
            "expressions": {
                "week-1": "All import paths are validated and covered by tests.",
                "week-2": "The splitter works; the separator style is still open."
            },
            "outputProfile": "email",
            "linkedin": {
                "includeSignature": true,
                "signature": "Thanks,\nThe Inkwise team"
            }
        }),
        "lessons-thread" => json!({
            "phase": "structure",
            "intent": "Five lessons from a year of writing in public",
            "claims": [
                { "id": "lesson-1", "text": "Lead with the point" },
                { "id": "lesson-2", "text": "One idea per paragraph" },
                { "id": "lesson-3", "text": "Cut the first sentence" },
                { "id": "lesson-4", "text": "Publish before it feels ready" },
                { "id": "lesson-5", "text": "Reply to every comment" }
            ],
            "expressions": {},
            "outputProfile": "xthread"
        }),
        _ => return None,
    };
    Some(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::profile::ProfileKey;

    #[test]
    fn every_catalogue_entry_loads() {
        for preset in PRESETS {
            let state = load_preset(preset.id, &mut SequentialIds::default()).unwrap();
            assert_eq!(state.ui.preset_id, preset.id);
            assert!(state.non_empty_claims().count() >= 2);
        }
    }

    #[test]
    fn launch_preset_is_linkedin_with_bullets() {
        let state = load_preset("product-launch", &mut SequentialIds::default()).unwrap();
        assert_eq!(state.output_profile, ProfileKey::Linkedin);
        assert!(state.linkedin.include_bullets);
        assert_eq!(state.linkedin.max_bullets, 3);
        assert_eq!(state.claims[0].id, "launch-1");
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let err = load_preset("nope", &mut SequentialIds::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownPreset(id) if id == "nope"));
    }
}
