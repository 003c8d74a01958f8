//! Person value type and its field newtypes.
//!
//! # Responsibility
//! - Validate person fields at construction time.
//! - Keep tag/group reference sets deduplicated and deterministically
//!   ordered so full equality behaves like set equality.
//!
//! # Invariants
//! - "Same person" means case-insensitive name equality.
//! - Full equality compares every field.
//! - Edits produce a new `Person`; no field is mutated in place.

use super::group::Group;
use super::registry::{EntityKind, Identity};
use super::tag::Tag;
use super::{fold_key, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub const NAME_CONSTRAINTS: &str = "Names should start with a letter or digit and may only \
     contain letters, digits, spaces, '/', '.' and ''', and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain. The \
     local-part may contain alphanumerics and '+', '_', '.', '-' but must not start or end with \
     them; the domain is made of labels separated by '.', and the last label must be at least 2 \
     characters long";
pub const ADDRESS_CONSTRAINTS: &str =
    "Addresses can take any values, but must not start with a whitespace or control character";
pub const NOTE_CONSTRAINTS: &str = "Notes may be empty. If present, the first character must \
     not be a whitespace or control character.";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} /.']*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}]+(?:[+_.\-][\p{L}\p{N}]+)*@(?:[\p{L}\p{N}](?:[\p{L}\p{N}\-]*[\p{L}\p{N}])?\.)*[\p{L}\p{N}](?:[\p{L}\p{N}\-]*[\p{L}\p{N}])?$",
    )
    .expect("valid email regex")
});
static FREE_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\p{Cc}][^\p{Cc}]*$").expect("valid free text regex"));

/// Full name of a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !NAME_RE.is_match(&value) {
            return Err(ValidationError::new(NAME_CONSTRAINTS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !PHONE_RE.is_match(&value) {
            return Err(ValidationError::new(PHONE_CONSTRAINTS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let domain_ok = value
            .rsplit(['.', '@'])
            .next()
            .map_or(false, |last| last.chars().count() >= 2);
        if !EMAIL_RE.is_match(&value) || !domain_ok {
            return Err(ValidationError::new(EMAIL_CONSTRAINTS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !FREE_TEXT_RE.is_match(&value) {
            return Err(ValidationError::new(ADDRESS_CONSTRAINTS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text remark about a person. The empty note means "no note".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Note(String);

impl Note {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !value.is_empty() && !FREE_TEXT_RE.is_match(&value) {
            return Err(ValidationError::new(NOTE_CONSTRAINTS));
        }
        Ok(Self(value))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable person record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Option<Phone>,
    email: Option<Email>,
    address: Option<Address>,
    note: Note,
    tags: Vec<Rc<Tag>>,
    groups: Vec<Rc<Group>>,
}

impl Person {
    /// Creates a person with only a name; other fields start empty.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            address: None,
            note: Note::empty(),
            tags: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: Name) -> Self {
        self.name = name;
        self
    }

    pub fn with_phone(mut self, phone: Option<Phone>) -> Self {
        self.phone = phone;
        self
    }

    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = email;
        self
    }

    pub fn with_address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = note;
        self
    }

    /// Replaces the tag set. Duplicates (case-insensitive) are collapsed.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Rc<Tag>>) -> Self {
        self.tags = normalize_refs(tags);
        self
    }

    /// Replaces the group set. Duplicates (case-insensitive) are collapsed.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = Rc<Group>>) -> Self {
        self.groups = normalize_refs(groups);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn tags(&self) -> &[Rc<Tag>] {
        &self.tags
    }

    pub fn groups(&self) -> &[Rc<Group>] {
        &self.groups
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|held| held.as_ref() == tag)
    }

    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.iter().any(|held| held.as_ref() == group)
    }

    /// Same identity: names equal ignoring case.
    pub fn is_same_person(&self, other: &Person) -> bool {
        fold_key(self.name.as_str()) == fold_key(other.name.as_str())
    }

    pub(crate) fn without_tag(&self, tag: &Tag) -> Person {
        let remaining: Vec<Rc<Tag>> = self
            .tags
            .iter()
            .filter(|held| held.as_ref() != tag)
            .cloned()
            .collect();
        self.clone().with_tags(remaining)
    }

    pub(crate) fn without_group(&self, group: &Group) -> Person {
        let remaining: Vec<Rc<Group>> = self
            .groups
            .iter()
            .filter(|held| held.as_ref() != group)
            .cloned()
            .collect();
        self.clone().with_groups(remaining)
    }
}

impl Identity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn identity_key(&self) -> String {
        fold_key(self.name.as_str())
    }

    fn label(&self) -> &str {
        self.name.as_str()
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(phone) = &self.phone {
            write!(f, "; Phone: {}", phone.as_str())?;
        }
        if let Some(email) = &self.email {
            write!(f, "; Email: {}", email.as_str())?;
        }
        if let Some(address) = &self.address {
            write!(f, "; Address: {}", address.as_str())?;
        }
        if !self.note.is_empty() {
            write!(f, "; Note: {}", self.note.as_str())?;
        }
        if !self.tags.is_empty() {
            f.write_str("; Tags: ")?;
            for tag in &self.tags {
                write!(f, "{tag}")?;
            }
        }
        if !self.groups.is_empty() {
            f.write_str("; Groups: ")?;
            for group in &self.groups {
                write!(f, "{group}")?;
            }
        }
        Ok(())
    }
}

fn normalize_refs<T: Identity>(refs: impl IntoIterator<Item = Rc<T>>) -> Vec<Rc<T>> {
    let mut normalized: Vec<Rc<T>> = Vec::new();
    for item in refs {
        let key = item.identity_key();
        if normalized.iter().all(|held| held.identity_key() != key) {
            normalized.push(item);
        }
    }
    normalized.sort_by_key(|item| item.identity_key());
    normalized
}
