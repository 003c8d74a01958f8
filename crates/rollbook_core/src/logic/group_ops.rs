//! Group command execution.

use super::command::{CommandError, CommandOutput, CommandResult};
use super::messages::MESSAGE_LISTED_GROUPS;
use super::person_ops::update_indexed;
use crate::model::filter::LabelFilter;
use crate::model::group::Group;
use crate::model::index::Index;
use crate::model::roster::Roster;
use std::rc::Rc;

pub(crate) fn create(roster: &mut Roster, group: &Group) -> CommandResult<CommandOutput> {
    if roster.has_group(group) {
        return Err(CommandError::DuplicateGroup);
    }
    let created = roster.add_group(group.clone())?;
    Ok(CommandOutput::message(format!("New group created: {created}")))
}

/// Deletes the group and detaches it from every member.
pub(crate) fn delete(roster: &mut Roster, group: &Group) -> CommandResult<CommandOutput> {
    let (removed, affected) = roster.delete_group(group)?;
    Ok(CommandOutput::message(format!(
        "Group deleted: {removed} (removed from {affected} person(s))"
    )))
}

/// Adds the group to each indexed person; members already in it are
/// skipped and not counted.
pub(crate) fn assign(
    roster: &mut Roster,
    group: &Group,
    indices: &[Index],
) -> CommandResult<CommandOutput> {
    let canonical = roster.get_group(group)?;
    let assigned = update_indexed(roster, indices, |person| {
        if person.has_group(&canonical) {
            return None;
        }
        let mut groups = person.groups().to_vec();
        groups.push(Rc::clone(&canonical));
        Some(person.clone().with_groups(groups))
    })?;
    Ok(CommandOutput::message(format!(
        "Assigned group {canonical} to {assigned} person(s)"
    )))
}

/// Removes the group from each indexed person; non-members are skipped.
pub(crate) fn unassign(
    roster: &mut Roster,
    group: &Group,
    indices: &[Index],
) -> CommandResult<CommandOutput> {
    let canonical = roster.get_group(group)?;
    let unassigned = update_indexed(roster, indices, |person| {
        person
            .has_group(&canonical)
            .then(|| person.without_group(&canonical))
    })?;
    Ok(CommandOutput::message(format!(
        "Unassigned group {canonical} from {unassigned} person(s)"
    )))
}

pub(crate) fn list(roster: &mut Roster) -> CommandOutput {
    roster.update_group_filter(LabelFilter::All);
    CommandOutput::message(MESSAGE_LISTED_GROUPS)
}
