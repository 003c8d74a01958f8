//! Serializable roster snapshot and its conversion to and from `Roster`.
//!
//! # Responsibility
//! - Flatten a roster into name-keyed records.
//! - Rebuild a roster from records, validating every value.
//!
//! # Invariants
//! - Duplicate persons, groups or tags inside one snapshot are rejected.
//! - Person references to unknown groups/tags are repaired by registering
//!   them, not rejected.

use super::{StorageError, StorageResult};
use crate::model::group::Group;
use crate::model::person::{Address, Email, Name, Note, Person, Phone};
use crate::model::registry::RegistryError;
use crate::model::roster::Roster;
use crate::model::tag::Tag;
use crate::model::ValidationError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Persisted shape: `{persons, groups, tags}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
}

impl RosterSnapshot {
    /// Captures every stored entity in registry order. Filters are ignored.
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            persons: roster
                .persons()
                .iter()
                .map(|person| PersonRecord::from_person(person))
                .collect(),
            groups: roster
                .groups()
                .iter()
                .map(|group| GroupRecord {
                    name: group.name().to_string(),
                })
                .collect(),
            tags: roster
                .tags()
                .iter()
                .map(|tag| TagRecord {
                    name: tag.name().to_string(),
                })
                .collect(),
        }
    }

    /// Rebuilds a roster.
    ///
    /// # Errors
    /// - `InvalidData` when a value fails validation or an entity appears
    ///   twice.
    pub fn into_roster(self) -> StorageResult<Roster> {
        let mut roster = Roster::new();

        for (position, record) in self.groups.into_iter().enumerate() {
            let group = Group::new(record.name).map_err(|err| invalid("group", position, err))?;
            roster
                .add_group(group)
                .map_err(|err| duplicate("group", position, err))?;
        }
        for (position, record) in self.tags.into_iter().enumerate() {
            let tag = Tag::new(record.name).map_err(|err| invalid("tag", position, err))?;
            roster
                .add_tag(tag)
                .map_err(|err| duplicate("tag", position, err))?;
        }

        let mut repaired = 0usize;
        for (position, record) in self.persons.into_iter().enumerate() {
            let person = record
                .into_person(&roster, &mut repaired)
                .map_err(|err| invalid("person", position, err))?;
            roster
                .add_person(person)
                .map_err(|err| duplicate("person", position, err))?;
        }

        if repaired > 0 {
            warn!(
                "event=snapshot_load module=storage status=repaired synthesized_refs={}",
                repaired
            );
        }
        Ok(roster)
    }
}

impl PersonRecord {
    fn from_person(person: &Person) -> Self {
        Self {
            name: person.name().as_str().to_string(),
            phone: person.phone().map(|phone| phone.as_str().to_string()),
            email: person.email().map(|email| email.as_str().to_string()),
            address: person.address().map(|address| address.as_str().to_string()),
            note: person.note().as_str().to_string(),
            tags: person
                .tags()
                .iter()
                .map(|tag| tag.name().to_string())
                .collect(),
            groups: person
                .groups()
                .iter()
                .map(|group| group.name().to_string())
                .collect(),
        }
    }

    /// Builds the person, counting references absent from `roster`.
    fn into_person(self, roster: &Roster, repaired: &mut usize) -> Result<Person, ValidationError> {
        let mut tags = Vec::with_capacity(self.tags.len());
        for name in self.tags {
            let tag = Tag::new(name)?;
            if !roster.has_tag(&tag) {
                *repaired += 1;
            }
            tags.push(Rc::new(tag));
        }
        let mut groups = Vec::with_capacity(self.groups.len());
        for name in self.groups {
            let group = Group::new(name)?;
            if !roster.has_group(&group) {
                *repaired += 1;
            }
            groups.push(Rc::new(group));
        }

        Ok(Person::new(Name::new(self.name)?)
            .with_phone(self.phone.map(Phone::new).transpose()?)
            .with_email(self.email.map(Email::new).transpose()?)
            .with_address(self.address.map(Address::new).transpose()?)
            .with_note(Note::new(self.note)?)
            .with_tags(tags)
            .with_groups(groups))
    }
}

fn invalid(kind: &str, position: usize, err: ValidationError) -> StorageError {
    StorageError::InvalidData(format!("{kind} #{}: {err}", position + 1))
}

fn duplicate(kind: &str, position: usize, err: RegistryError) -> StorageError {
    StorageError::InvalidData(format!("{kind} #{}: {err}", position + 1))
}
