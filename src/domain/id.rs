//! Field identifiers and their generators

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a field.
///
/// Assigned once at creation and never changed. Two ids are only ever
/// compared for equality; their textual form carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Source of fresh field ids.
///
/// Implementations must not hand out the same id twice within one editing
/// session. Cryptographic strength is not required.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    fn next_id(&self) -> FieldId;
}

/// Random ids from UUID v4, rendered in simple (hyphen-less) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> FieldId {
        FieldId(Uuid::new_v4().simple().to_string())
    }
}

/// Counter based ids: `f1`, `f2`, ...
///
/// Deterministic, which makes scripted sessions and tests reproducible.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("f")
    }
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> FieldId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        FieldId(format!("{}{}", self.prefix, n))
    }
}
