//! Output profiles: the named target formats a draft can be rendered into.

use serde::{Deserialize, Serialize};

/// Key of a recognised output profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKey {
    #[default]
    Linkedin,
    Xthread,
    Email,
    Memo,
    Blog,
    Custom,
}

impl ProfileKey {
    /// Parse a wire key. Returns `None` for anything unrecognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "linkedin" => Some(Self::Linkedin),
            "xthread" => Some(Self::Xthread),
            "email" => Some(Self::Email),
            "memo" => Some(Self::Memo),
            "blog" => Some(Self::Blog),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Xthread => "xthread",
            Self::Email => "email",
            Self::Memo => "memo",
            Self::Blog => "blog",
            Self::Custom => "custom",
        }
    }

    /// The static descriptor for this profile.
    pub fn descriptor(self) -> &'static OutputProfile {
        // PROFILES is declared in enum order.
        &PROFILES[self as usize]
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of an output profile. Not persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputProfile {
    pub key: ProfileKey,
    pub label: &'static str,
    /// Overall character budget for the rendered draft.
    pub max_chars: usize,
    /// Per-post limit for profiles that split into a thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    pub hint: &'static str,
}

/// All six profiles, in [`ProfileKey`] order.
pub static PROFILES: [OutputProfile; 6] = [
    OutputProfile {
        key: ProfileKey::Linkedin,
        label: "LinkedIn post",
        max_chars: 3000,
        chunk_size: None,
        hint: "Hook first, short paragraphs, optional bullets and hashtags.",
    },
    OutputProfile {
        key: ProfileKey::Xthread,
        label: "X / Twitter thread",
        max_chars: 25000,
        chunk_size: Some(280),
        hint: "Split into numbered posts of at most 280 characters.",
    },
    OutputProfile {
        key: ProfileKey::Email,
        label: "Email",
        max_chars: 20000,
        chunk_size: None,
        hint: "Subject line from the hook, body from the draft.",
    },
    OutputProfile {
        key: ProfileKey::Memo,
        label: "Memo",
        max_chars: 20000,
        chunk_size: None,
        hint: "Title, TL;DR, details and next steps.",
    },
    OutputProfile {
        key: ProfileKey::Blog,
        label: "Blog article",
        max_chars: 100000,
        chunk_size: None,
        hint: "Intent as the title, one section per claim.",
    },
    OutputProfile {
        key: ProfileKey::Custom,
        label: "Custom",
        max_chars: 20000,
        chunk_size: None,
        hint: "Plain text, no profile-specific shaping.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_line_up_with_keys() {
        for profile in &PROFILES {
            assert_eq!(profile.key.descriptor().key, profile.key);
            assert_eq!(ProfileKey::parse(profile.key.as_str()), Some(profile.key));
        }
    }

    #[test]
    fn only_the_thread_profile_chunks() {
        assert_eq!(ProfileKey::Xthread.descriptor().chunk_size, Some(280));
        assert_eq!(ProfileKey::Xthread.descriptor().max_chars, 25000);
        assert!(ProfileKey::Linkedin.descriptor().chunk_size.is_none());
        assert_eq!(ProfileKey::Blog.descriptor().max_chars, 100000);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(ProfileKey::parse("LinkedIn"), None);
        assert_eq!(ProfileKey::parse("tiktok"), None);
    }
}
