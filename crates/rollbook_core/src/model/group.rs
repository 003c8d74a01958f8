//! Group value type.
//!
//! # Invariants
//! - Names match `[letters digits _ - /]+` and are at most 100 chars.
//! - Equality and hashing ignore case.

use super::registry::{EntityKind, Identity};
use super::{fold_key, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

pub const GROUP_CONSTRAINTS: &str =
    "Group names should be alphanumeric, at most 100 characters, and may include '-', '_' or '/'";

const GROUP_NAME_MAX_CHARS: usize = 100;

static GROUP_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_/\-]+$").expect("valid group name regex"));

/// Named cohort a person can belong to (e.g. a class or tutorial slot).
#[derive(Debug, Clone, Eq)]
pub struct Group {
    name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(ValidationError::new(GROUP_CONSTRAINTS));
        }
        Ok(Self { name })
    }

    pub fn is_valid_name(value: &str) -> bool {
        value.chars().count() <= GROUP_NAME_MAX_CHARS && GROUP_NAME_RE.is_match(value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        fold_key(&self.name) == fold_key(&other.name)
    }
}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_key(&self.name).hash(state);
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

impl Identity for Group {
    const KIND: EntityKind = EntityKind::Group;

    fn identity_key(&self) -> String {
        fold_key(&self.name)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::Group;

    #[test]
    fn validates_allowed_characters() {
        for name in ["CS2103T", "cs2103t", "CS-2103T", "CS_2103T", "CS2103T/G01", "123456"] {
            assert!(Group::is_valid_name(name), "{name} should be valid");
        }
        for name in ["", " ", "CS 2103T", "CS@2103T", "CS#2103T", "CS.2103T"] {
            assert!(!Group::is_valid_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn enforces_length_limit() {
        assert!(Group::new("a".repeat(100)).is_ok());
        assert!(Group::new("a".repeat(101)).is_err());
    }

    #[test]
    fn displays_in_brackets_and_compares_case_insensitively() {
        let group = Group::new("CS2103T").unwrap();
        assert_eq!(group.to_string(), "[CS2103T]");
        assert_eq!(group, Group::new("cs2103t").unwrap());
        assert_ne!(group, Group::new("CS2101").unwrap());
    }
}
