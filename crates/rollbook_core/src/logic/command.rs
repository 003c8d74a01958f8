//! Closed set of executable commands.
//!
//! # Responsibility
//! - Carry validated arguments from the parser to execution.
//! - Map every failure to a user-facing [`CommandError`].
//!
//! # Invariants
//! - Commands are immutable once parsed.
//! - Multi-person operations validate every index before mutating.
//! - Nothing here persists; saving is the facade's job.

use super::messages::{
    format_missing_groups, format_missing_tags, format_save_failed,
    format_save_permission_denied, MESSAGE_CLEAR_NO_SKIP, MESSAGE_CLEAR_PENDING,
    MESSAGE_CLEAR_REQUEST, MESSAGE_CLEAR_SUCCESS, MESSAGE_DUPLICATE_GROUP,
    MESSAGE_DUPLICATE_PERSON, MESSAGE_DUPLICATE_TAG, MESSAGE_EXITING, MESSAGE_GROUP_NOT_FOUND,
    MESSAGE_INVALID_PERSON_DISPLAYED_INDEX, MESSAGE_SHOWING_HELP, MESSAGE_SHOWING_STATS,
    MESSAGE_TAG_NOT_FOUND,
};
use super::person_ops::{self, PersonChanges};
use super::session::Session;
use super::{group_ops, tag_ops};
use crate::model::filter::PersonFilter;
use crate::model::group::Group;
use crate::model::index::Index;
use crate::model::person::{Note, Person};
use crate::model::registry::{EntityKind, RegistryError};
use crate::model::tag::Tag;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CommandResult<T> = Result<T, CommandError>;

/// One parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `person` carries scalar fields only; references are listed as typed.
    Add {
        person: Person,
        tags: Vec<Tag>,
        groups: Vec<Group>,
    },
    Edit {
        index: Index,
        changes: PersonChanges,
    },
    Delete {
        index: Index,
    },
    Find {
        filter: PersonFilter,
    },
    FindTag {
        tag: Tag,
    },
    Sort,
    List,
    GroupCreate {
        group: Group,
    },
    GroupDelete {
        group: Group,
    },
    GroupAssign {
        group: Group,
        indices: Vec<Index>,
    },
    GroupUnassign {
        group: Group,
        indices: Vec<Index>,
    },
    GroupList,
    TagCreate {
        tag: Tag,
    },
    TagDelete {
        tag: Tag,
    },
    TagAssign {
        tag: Tag,
        indices: Vec<Index>,
    },
    TagUnassign {
        tag: Tag,
        indices: Vec<Index>,
    },
    TagList,
    NoteCreate {
        index: Index,
        note: Note,
    },
    NoteDelete {
        index: Index,
    },
    Clear {
        confirmed: bool,
    },
    Stats,
    Help,
    Exit,
}

impl Command {
    /// Keyword used for logging; never contains user data.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Find { .. } => "find",
            Self::FindTag { .. } => "findtag",
            Self::Sort => "sort",
            Self::List => "list",
            Self::GroupCreate { .. } => "group/create",
            Self::GroupDelete { .. } => "group/delete",
            Self::GroupAssign { .. } => "group/assign",
            Self::GroupUnassign { .. } => "group/unassign",
            Self::GroupList => "group/list",
            Self::TagCreate { .. } => "tag/create",
            Self::TagDelete { .. } => "tag/delete",
            Self::TagAssign { .. } => "tag/assign",
            Self::TagUnassign { .. } => "tag/unassign",
            Self::TagList => "tag/list",
            Self::NoteCreate { .. } => "note/create",
            Self::NoteDelete { .. } => "note/delete",
            Self::Clear { confirmed: false } => "clear",
            Self::Clear { confirmed: true } => "clear confirm",
            Self::Stats => "stats",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Runs the command against the session state.
    ///
    /// # Errors
    /// - Any [`CommandError`] except `Storage`, which only the facade raises.
    pub fn execute(&self, session: &mut Session) -> CommandResult<CommandOutput> {
        match self {
            Self::Add {
                person,
                tags,
                groups,
            } => person_ops::add(session.roster_mut(), person, tags, groups),
            Self::Edit { index, changes } => person_ops::edit(session.roster_mut(), *index, changes),
            Self::Delete { index } => person_ops::delete(session.roster_mut(), *index),
            Self::Find { filter } => Ok(person_ops::find(session.roster_mut(), filter.clone())),
            Self::FindTag { tag } => Ok(person_ops::find(
                session.roster_mut(),
                PersonFilter::HasTag(tag.clone()),
            )),
            Self::Sort => Ok(person_ops::sort(session.roster_mut())),
            Self::List => Ok(person_ops::list(session.roster_mut())),
            Self::GroupCreate { group } => group_ops::create(session.roster_mut(), group),
            Self::GroupDelete { group } => group_ops::delete(session.roster_mut(), group),
            Self::GroupAssign { group, indices } => {
                group_ops::assign(session.roster_mut(), group, indices)
            }
            Self::GroupUnassign { group, indices } => {
                group_ops::unassign(session.roster_mut(), group, indices)
            }
            Self::GroupList => Ok(group_ops::list(session.roster_mut())),
            Self::TagCreate { tag } => tag_ops::create(session.roster_mut(), tag),
            Self::TagDelete { tag } => tag_ops::delete(session.roster_mut(), tag),
            Self::TagAssign { tag, indices } => tag_ops::assign(session.roster_mut(), tag, indices),
            Self::TagUnassign { tag, indices } => {
                tag_ops::unassign(session.roster_mut(), tag, indices)
            }
            Self::TagList => Ok(tag_ops::list(session.roster_mut())),
            Self::NoteCreate { index, note } => {
                person_ops::set_note(session.roster_mut(), *index, note.clone())
            }
            Self::NoteDelete { index } => {
                person_ops::set_note(session.roster_mut(), *index, Note::empty())
            }
            Self::Clear { confirmed } => execute_clear(session, *confirmed),
            Self::Stats => Ok(CommandOutput {
                show_stats: true,
                ..CommandOutput::message(MESSAGE_SHOWING_STATS)
            }),
            Self::Help => Ok(CommandOutput {
                show_help: true,
                ..CommandOutput::message(MESSAGE_SHOWING_HELP)
            }),
            Self::Exit => Ok(CommandOutput {
                exit: true,
                ..CommandOutput::message(MESSAGE_EXITING)
            }),
        }
    }
}

fn execute_clear(session: &mut Session, confirmed: bool) -> CommandResult<CommandOutput> {
    let (roster, clear) = session.parts_mut();
    if !confirmed {
        let message = if clear.request() {
            MESSAGE_CLEAR_REQUEST
        } else {
            MESSAGE_CLEAR_PENDING
        };
        return Ok(CommandOutput::message(message));
    }
    if !clear.confirm() {
        return Err(CommandError::ClearNotRequested);
    }
    roster.clear();
    Ok(CommandOutput::message(MESSAGE_CLEAR_SUCCESS))
}

/// Feedback plus presentation flags for one executed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
    pub show_stats: bool,
}

impl CommandOutput {
    /// Plain feedback with every flag off.
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }
}

/// Well-formed command that cannot be satisfied against current state.
#[derive(Debug)]
pub enum CommandError {
    InvalidPersonIndex,
    DuplicatePerson,
    /// Tag names not registered, as typed and in input order.
    MissingTags(Vec<String>),
    /// Group names not registered, as typed and in input order.
    MissingGroups(Vec<String>),
    GroupNotFound,
    DuplicateGroup,
    TagNotFound,
    DuplicateTag,
    /// `clear confirm` without a preceding `clear`.
    ClearNotRequested,
    /// Change applied in memory but the snapshot could not be saved.
    Storage(StorageError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPersonIndex => f.write_str(MESSAGE_INVALID_PERSON_DISPLAYED_INDEX),
            Self::DuplicatePerson => f.write_str(MESSAGE_DUPLICATE_PERSON),
            Self::MissingTags(names) => f.write_str(&format_missing_tags(names)),
            Self::MissingGroups(names) => f.write_str(&format_missing_groups(names)),
            Self::GroupNotFound => f.write_str(MESSAGE_GROUP_NOT_FOUND),
            Self::DuplicateGroup => f.write_str(MESSAGE_DUPLICATE_GROUP),
            Self::TagNotFound => f.write_str(MESSAGE_TAG_NOT_FOUND),
            Self::DuplicateTag => f.write_str(MESSAGE_DUPLICATE_TAG),
            Self::ClearNotRequested => f.write_str(MESSAGE_CLEAR_NO_SKIP),
            Self::Storage(StorageError::PermissionDenied { path }) => {
                f.write_str(&format_save_permission_denied(&path.display().to_string()))
            }
            Self::Storage(err) => f.write_str(&format_save_failed(&err.to_string())),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for CommandError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::Duplicate { kind, .. } => match kind {
                EntityKind::Person => Self::DuplicatePerson,
                EntityKind::Group => Self::DuplicateGroup,
                EntityKind::Tag => Self::DuplicateTag,
            },
            RegistryError::NotFound { kind, .. } => match kind {
                EntityKind::Person => Self::InvalidPersonIndex,
                EntityKind::Group => Self::GroupNotFound,
                EntityKind::Tag => Self::TagNotFound,
            },
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
