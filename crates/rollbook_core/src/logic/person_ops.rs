//! Person-level command execution.
//!
//! # Responsibility
//! - Add, edit, delete, find, sort and annotate persons.
//! - Resolve typed tag/group names to registry instances, reporting every
//!   missing name at once.
//! - Provide the validate-then-mutate batch helper used by assign and
//!   unassign commands.
//!
//! # Invariants
//! - Index validation always happens before any roster mutation.
//! - Stored persons only ever reference canonical tags and groups.

use super::command::{CommandError, CommandOutput, CommandResult};
use super::messages::{
    format_note_added, format_note_deleted, format_person_added, format_person_deleted,
    format_person_edited, format_persons_listed, MESSAGE_LISTED_PERSONS, MESSAGE_SORTED,
};
use crate::model::filter::{LabelFilter, PersonFilter};
use crate::model::group::Group;
use crate::model::index::Index;
use crate::model::person::{Address, Email, Name, Note, Person, Phone};
use crate::model::registry::{Identity, RegistryResult};
use crate::model::roster::Roster;
use crate::model::tag::Tag;
use std::rc::Rc;

/// Field changes requested by `edit`.
///
/// The outer `Option` means "field given"; for optional fields the inner
/// `None` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub name: Option<Name>,
    pub phone: Option<Option<Phone>>,
    pub email: Option<Option<Email>>,
    pub address: Option<Option<Address>>,
    /// Replacement tag set, as typed.
    pub tags: Option<Vec<Tag>>,
    /// Replacement group set, as typed.
    pub groups: Option<Vec<Group>>,
}

impl PersonChanges {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.tags.is_some()
            || self.groups.is_some()
    }

    fn apply(
        &self,
        target: &Person,
        tags: Option<Vec<Rc<Tag>>>,
        groups: Option<Vec<Rc<Group>>>,
    ) -> Person {
        let mut edited = target.clone();
        if let Some(name) = &self.name {
            edited = edited.with_name(name.clone());
        }
        if let Some(phone) = &self.phone {
            edited = edited.with_phone(phone.clone());
        }
        if let Some(email) = &self.email {
            edited = edited.with_email(email.clone());
        }
        if let Some(address) = &self.address {
            edited = edited.with_address(address.clone());
        }
        if let Some(tags) = tags {
            edited = edited.with_tags(tags);
        }
        if let Some(groups) = groups {
            edited = edited.with_groups(groups);
        }
        edited
    }
}

pub(crate) fn add(
    roster: &mut Roster,
    person: &Person,
    tags: &[Tag],
    groups: &[Group],
) -> CommandResult<CommandOutput> {
    if roster.has_person(person) {
        return Err(CommandError::DuplicatePerson);
    }
    let tags = resolve(tags, |tag| roster.get_tag(tag), CommandError::MissingTags)?;
    let groups = resolve(groups, |group| roster.get_group(group), CommandError::MissingGroups)?;

    let stored = roster.add_person(person.clone().with_tags(tags).with_groups(groups))?;
    Ok(CommandOutput::message(format_person_added(&stored)))
}

pub(crate) fn edit(
    roster: &mut Roster,
    index: Index,
    changes: &PersonChanges,
) -> CommandResult<CommandOutput> {
    let target = person_at(roster, index)?;
    let tags = changes
        .tags
        .as_deref()
        .map(|tags| resolve(tags, |tag| roster.get_tag(tag), CommandError::MissingTags))
        .transpose()?;
    let groups = changes
        .groups
        .as_deref()
        .map(|groups| {
            resolve(
                groups,
                |group| roster.get_group(group),
                CommandError::MissingGroups,
            )
        })
        .transpose()?;

    let edited = changes.apply(&target, tags, groups);
    if !target.is_same_person(&edited) && roster.has_person(&edited) {
        return Err(CommandError::DuplicatePerson);
    }
    let stored = roster.set_person(&target, edited)?;
    roster.update_person_filter(PersonFilter::All);
    Ok(CommandOutput::message(format_person_edited(&stored)))
}

pub(crate) fn delete(roster: &mut Roster, index: Index) -> CommandResult<CommandOutput> {
    let target = person_at(roster, index)?;
    let removed = roster.remove_person(&target)?;
    Ok(CommandOutput::message(format_person_deleted(&removed)))
}

/// Narrows the person list. A group search also narrows the group list to
/// the matching groups until the next `group/list`.
pub(crate) fn find(roster: &mut Roster, filter: PersonFilter) -> CommandOutput {
    if let PersonFilter::GroupContains(keywords) = &filter {
        roster.update_group_filter(LabelFilter::NameContains(keywords.clone()));
    }
    roster.update_person_filter(filter);
    CommandOutput::message(format_persons_listed(roster.filtered_persons().len()))
}

pub(crate) fn sort(roster: &mut Roster) -> CommandOutput {
    roster.sort_persons();
    CommandOutput::message(MESSAGE_SORTED)
}

pub(crate) fn list(roster: &mut Roster) -> CommandOutput {
    roster.update_person_filter(PersonFilter::All);
    CommandOutput::message(MESSAGE_LISTED_PERSONS)
}

/// Sets (or, with an empty note, removes) the note of the indexed person.
pub(crate) fn set_note(
    roster: &mut Roster,
    index: Index,
    note: Note,
) -> CommandResult<CommandOutput> {
    let target = person_at(roster, index)?;
    let removing = note.is_empty();
    let stored = roster.set_person(&target, target.as_ref().clone().with_note(note))?;
    let feedback = if removing {
        format_note_deleted(&stored)
    } else {
        format_note_added(&stored)
    };
    Ok(CommandOutput::message(feedback))
}

/// Applies `change` to every indexed person of the current filtered list.
///
/// All indices are checked first; a single bad index fails the whole batch
/// with nobody touched. `change` returns `None` to skip a person. Repeated
/// indices count once. Returns the number of persons actually replaced.
pub(crate) fn update_indexed(
    roster: &mut Roster,
    indices: &[Index],
    mut change: impl FnMut(&Person) -> Option<Person>,
) -> CommandResult<usize> {
    let mut targets: Vec<Rc<Person>> = Vec::with_capacity(indices.len());
    for index in indices {
        let target = person_at(roster, *index)?;
        if !targets.iter().any(|seen| Rc::ptr_eq(seen, &target)) {
            targets.push(target);
        }
    }

    let mut updated = 0;
    for target in &targets {
        if let Some(replacement) = change(target.as_ref()) {
            roster.set_person(target, replacement)?;
            updated += 1;
        }
    }
    Ok(updated)
}

fn person_at(roster: &Roster, index: Index) -> CommandResult<Rc<Person>> {
    roster
        .filtered_person_at(index)
        .ok_or(CommandError::InvalidPersonIndex)
}

fn resolve<T: Identity>(
    typed: &[T],
    lookup: impl Fn(&T) -> RegistryResult<Rc<T>>,
    missing: fn(Vec<String>) -> CommandError,
) -> CommandResult<Vec<Rc<T>>> {
    let mut resolved = Vec::with_capacity(typed.len());
    let mut absent = Vec::new();
    for value in typed {
        match lookup(value) {
            Ok(canonical) => resolved.push(canonical),
            Err(_) => absent.push(value.label().to_string()),
        }
    }
    if absent.is_empty() {
        Ok(resolved)
    } else {
        Err(missing(absent))
    }
}
