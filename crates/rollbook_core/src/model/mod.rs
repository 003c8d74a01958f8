//! Roster domain model.
//!
//! # Responsibility
//! - Define the immutable value types (`Person`, `Group`, `Tag`, field
//!   newtypes) and their format constraints.
//! - Own the canonical-instance registries and the `Roster` aggregate.
//!
//! # Invariants
//! - Group and tag identity is case-insensitive on name.
//! - Every group/tag referenced by a stored person resolves to the
//!   registry's canonical `Rc` instance.
//! - Values are replaced wholesale, never mutated in place.

pub mod filter;
pub mod group;
pub mod index;
pub mod person;
pub mod registry;
pub mod roster;
pub mod stats;
pub mod tag;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raised when a raw string does not satisfy a value type's format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable constraint the value violated.
    pub constraint: &'static str,
}

impl ValidationError {
    pub(crate) fn new(constraint: &'static str) -> Self {
        Self { constraint }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.constraint)
    }
}

impl Error for ValidationError {}

/// Case-folded identity key used by registries and set membership.
pub(crate) fn fold_key(value: &str) -> String {
    value.to_lowercase()
}
