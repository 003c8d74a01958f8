//! Tag value type.
//!
//! # Invariants
//! - Names match `[letters digits _ - /]+`.
//! - Equality and hashing ignore case, so `Weak` and `weak` are one tag.

use super::registry::{EntityKind, Identity};
use super::{fold_key, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

pub const TAG_CONSTRAINTS: &str =
    "Tag names should be alphanumeric and may include '-', '_' or '/'";

static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_/\-]+$").expect("valid tag name regex"));

/// Classification label attached to persons.
#[derive(Debug, Clone, Eq)]
pub struct Tag {
    name: String,
}

impl Tag {
    /// Builds a tag after validating its name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(ValidationError::new(TAG_CONSTRAINTS));
        }
        Ok(Self { name })
    }

    pub fn is_valid_name(value: &str) -> bool {
        TAG_NAME_RE.is_match(value)
    }

    /// Name as originally typed.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        fold_key(&self.name) == fold_key(&other.name)
    }
}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_key(&self.name).hash(state);
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

impl Identity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    fn identity_key(&self) -> String {
        fold_key(&self.name)
    }

    fn label(&self) -> &str {
        &self.name
    }
}
