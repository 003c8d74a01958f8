//! Canonical-instance registry shared by persons, groups and tags.
//!
//! # Responsibility
//! - Enforce case-insensitive identity uniqueness per entity kind.
//! - Hand out the single shared `Rc` instance for a given identity.
//!
//! # Invariants
//! - Insertion order is preserved; no two entries share an identity key.
//! - The registry knows nothing about cross-entity references. Cascades
//!   live one level up, in `Roster`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Entity kinds stored in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Group,
    Tag,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Group => "group",
            Self::Tag => "tag",
        }
    }
}

/// Identity contract for registry payloads.
pub trait Identity {
    const KIND: EntityKind;

    /// Case-folded key; two values with equal keys are "the same" entity.
    fn identity_key(&self) -> String;

    /// Display name used in error messages.
    fn label(&self) -> &str;
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An entry with the same identity already exists.
    Duplicate { kind: EntityKind, name: String },
    /// No entry with the requested identity exists.
    NotFound { kind: EntityKind, name: String },
}

impl RegistryError {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Duplicate { kind, .. } | Self::NotFound { kind, .. } => *kind,
        }
    }
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { kind, name } => {
                write!(f, "duplicate {}: `{name}`", kind.as_str())
            }
            Self::NotFound { kind, name } => write!(f, "{} not found: `{name}`", kind.as_str()),
        }
    }
}

impl Error for RegistryError {}

/// Ordered set of canonical entity instances.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<Rc<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Identity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether an entry with the same identity exists.
    pub fn contains(&self, probe: &T) -> bool {
        self.position(probe).is_some()
    }

    /// Inserts a new entry at the end and returns its canonical handle.
    ///
    /// # Errors
    /// - `Duplicate` when an entry with the same identity exists.
    pub fn add(&mut self, value: T) -> RegistryResult<Rc<T>> {
        self.add_shared(Rc::new(value))
    }

    /// Same as [`Registry::add`] but keeps the caller's `Rc` as canonical.
    pub fn add_shared(&mut self, value: Rc<T>) -> RegistryResult<Rc<T>> {
        if self.contains(&value) {
            return Err(duplicate(value.as_ref()));
        }
        self.entries.push(Rc::clone(&value));
        Ok(value)
    }

    /// Returns the canonical instance for `probe`.
    pub fn get(&self, probe: &T) -> RegistryResult<Rc<T>> {
        self.find(probe).cloned().ok_or_else(|| not_found(probe))
    }

    pub fn find(&self, probe: &T) -> Option<&Rc<T>> {
        self.position(probe).map(|index| &self.entries[index])
    }

    /// Removes the entry matching `probe` and returns it.
    pub fn remove(&mut self, probe: &T) -> RegistryResult<Rc<T>> {
        let index = self.position(probe).ok_or_else(|| not_found(probe))?;
        Ok(self.entries.remove(index))
    }

    /// Replaces `target` in place with `replacement`, keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when `target` is absent.
    /// - `Duplicate` when `replacement` collides with a different entry.
    pub fn replace(&mut self, target: &T, replacement: Rc<T>) -> RegistryResult<Rc<T>> {
        let index = self.position(target).ok_or_else(|| not_found(target))?;
        let replacement_key = replacement.identity_key();
        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(other, entry)| other != index && entry.identity_key() == replacement_key);
        if collides {
            return Err(duplicate(replacement.as_ref()));
        }
        self.entries[index] = Rc::clone(&replacement);
        Ok(replacement)
    }

    /// Stable sort by the given key; ties keep their relative order.
    pub fn sort_by_key<K: Ord>(&mut self, mut key: impl FnMut(&T) -> K) {
        self.entries.sort_by_key(|entry| key(entry));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<T>> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Rc<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, probe: &T) -> Option<usize> {
        let key = probe.identity_key();
        self.entries
            .iter()
            .position(|entry| entry.identity_key() == key)
    }
}

impl<T: PartialEq> PartialEq for Registry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

fn duplicate<T: Identity>(value: &T) -> RegistryError {
    RegistryError::Duplicate {
        kind: T::KIND,
        name: value.label().to_string(),
    }
}

fn not_found<T: Identity>(value: &T) -> RegistryError {
    RegistryError::NotFound {
        kind: T::KIND,
        name: value.label().to_string(),
    }
}
