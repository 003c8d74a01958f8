//! Tag command execution. Mirrors the group commands, including the
//! cascade on delete.

use super::command::{CommandError, CommandOutput, CommandResult};
use super::messages::MESSAGE_LISTED_TAGS;
use super::person_ops::update_indexed;
use crate::model::filter::LabelFilter;
use crate::model::index::Index;
use crate::model::roster::Roster;
use crate::model::tag::Tag;
use std::rc::Rc;

pub(crate) fn create(roster: &mut Roster, tag: &Tag) -> CommandResult<CommandOutput> {
    if roster.has_tag(tag) {
        return Err(CommandError::DuplicateTag);
    }
    let created = roster.add_tag(tag.clone())?;
    Ok(CommandOutput::message(format!("New tag created: {created}")))
}

pub(crate) fn delete(roster: &mut Roster, tag: &Tag) -> CommandResult<CommandOutput> {
    let (removed, affected) = roster.delete_tag(tag)?;
    Ok(CommandOutput::message(format!(
        "Deleted tag: {removed} (removed from {affected} person(s))"
    )))
}

pub(crate) fn assign(
    roster: &mut Roster,
    tag: &Tag,
    indices: &[Index],
) -> CommandResult<CommandOutput> {
    let canonical = roster.get_tag(tag)?;
    let assigned = update_indexed(roster, indices, |person| {
        if person.has_tag(&canonical) {
            return None;
        }
        let mut tags = person.tags().to_vec();
        tags.push(Rc::clone(&canonical));
        Some(person.clone().with_tags(tags))
    })?;
    Ok(CommandOutput::message(format!(
        "Assigned tag {canonical} to {assigned} person(s)"
    )))
}

pub(crate) fn unassign(
    roster: &mut Roster,
    tag: &Tag,
    indices: &[Index],
) -> CommandResult<CommandOutput> {
    let canonical = roster.get_tag(tag)?;
    let unassigned = update_indexed(roster, indices, |person| {
        person
            .has_tag(&canonical)
            .then(|| person.without_tag(&canonical))
    })?;
    Ok(CommandOutput::message(format!(
        "Unassigned tag {canonical} from {unassigned} person(s)"
    )))
}

pub(crate) fn list(roster: &mut Roster) -> CommandOutput {
    roster.update_tag_filter(LabelFilter::All);
    CommandOutput::message(MESSAGE_LISTED_TAGS)
}
