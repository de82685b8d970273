//! Claim identifier generation.
//!
//! The sanitizer needs fresh ids whenever a claim arrives without one.
//! Production code uses random UUIDs; tests inject [`SequentialIds`] so that
//! reconciled output is deterministic.

use uuid::Uuid;

/// Source of fresh, non-empty claim identifiers.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random `c_<uuid>` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        format!("c_{}", Uuid::new_v4().simple())
    }
}

/// Predictable `<prefix><n>` identifiers, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
