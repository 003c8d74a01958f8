//! User-facing message catalogue.
//!
//! Every string shown to users lives here so commands, the parser and the
//! CLI agree on wording. Templates use `{}` placeholders filled by the
//! `format_*` helpers below.

use crate::model::person::Person;

pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_INVALID_COMMAND_FORMAT: &str = "Invalid command format! ";
pub const MESSAGE_INVALID_PERSON_DISPLAYED_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_DUPLICATE_FIELDS: &str =
    "Multiple values specified for the following single-valued field(s): ";
pub const MESSAGE_EXTRA_ARGUMENTS: &str = "This command does not take any arguments.";
pub const MESSAGE_SINGLE_PARAMETER_ONLY: &str =
    "Please search by exactly one of n/NAME or g/GROUP, given once.";
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book";
pub const MESSAGE_GROUP_NOT_FOUND: &str =
    "This group does not exist. Create it first using group/create.";
pub const MESSAGE_DUPLICATE_GROUP: &str = "This group already exists.";
pub const MESSAGE_TAG_NOT_FOUND: &str = "This tag does not exist in the address book";
pub const MESSAGE_DUPLICATE_TAG: &str = "This tag already exists in the address book";

pub const MESSAGE_CLEAR_REQUEST: &str = "Are you sure you want to clear the student list? This \
     action cannot be undone. Type 'clear confirm' to confirm.";
pub const MESSAGE_CLEAR_PENDING: &str = "Please type 'clear confirm' to proceed.";
pub const MESSAGE_CLEAR_NO_SKIP: &str = "Please type 'clear' first.";
pub const MESSAGE_CLEAR_SUCCESS: &str = "Student list has been cleared!";

pub const MESSAGE_SORTED: &str = "List sorted alphabetically by name";
pub const MESSAGE_LISTED_PERSONS: &str = "Listed all persons";
pub const MESSAGE_LISTED_GROUPS: &str = "Listed all groups";
pub const MESSAGE_LISTED_TAGS: &str = "Listed all tags";
pub const MESSAGE_SHOWING_STATS: &str = "Showing student statistics...";
pub const MESSAGE_SHOWING_HELP: &str = "Opened help window.";
pub const MESSAGE_EXITING: &str = "Exiting as requested ...";

pub const USAGE_ADD: &str = "add: Adds a person to the address book. Parameters: n/NAME \
     [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]... [g/GROUP]...\nExample: add n/John Doe \
     p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 t/friends g/CS2103T";
pub const USAGE_EDIT: &str = "edit: Edits the details of the person identified by the index \
     number used in the displayed person list. Existing values will be overwritten by the input \
     values.\nParameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] \
     [a/ADDRESS] [t/TAG]... [g/GROUP]...\nExample: edit 1 p/91234567 e/johndoe@example.com";
pub const USAGE_DELETE: &str = "delete: Deletes the person identified by the index number used \
     in the displayed person list.\nParameters: INDEX (must be a positive integer)\nExample: \
     delete 1";
pub const USAGE_FIND: &str = "find: Finds all persons whose names or groups contain any of the \
     specified keywords (case-insensitive).\nParameters: n/KEYWORD [MORE_KEYWORDS]... or \
     g/KEYWORD [MORE_KEYWORDS]...\nExample: find n/alice bob";
pub const USAGE_FIND_TAG: &str = "findtag: Finds all persons who have the specified tag \
     (case-insensitive). Only one tag is allowed.\nParameters: t/TAG\nExample: findtag \
     t/needs_help";
pub const USAGE_SORT: &str = "sort: Sorts the person list alphabetically by name.\nExample: sort";
pub const USAGE_LIST: &str = "list: Lists all persons.\nExample: list";
pub const USAGE_CLEAR: &str = "clear: Clears the student list after confirmation.\nExample: \
     clear, then clear confirm";
pub const USAGE_GROUP_CREATE: &str =
    "group/create: Creates a new group. Parameters: g/GROUP\nExample: group/create g/CS2103T";
pub const USAGE_GROUP_DELETE: &str = "group/delete: Deletes a group and removes it from every \
     person. Parameters: g/GROUP\nExample: group/delete g/CS2103T";
pub const USAGE_GROUP_ASSIGN: &str = "group/assign: Assigns a group to one or more persons \
     identified by their index numbers in the displayed person list. Parameters: INDEX \
     [INDEX]... g/GROUP\nExample: group/assign 1 2 3 g/CS2103T";
pub const USAGE_GROUP_UNASSIGN: &str = "group/unassign: Removes a group from one or more \
     persons identified by their index numbers in the displayed person list. Parameters: INDEX \
     [INDEX]... g/GROUP\nExample: group/unassign 1 2 g/CS2103T";
pub const USAGE_GROUP_LIST: &str = "group/list: Lists all groups.\nExample: group/list";
pub const USAGE_TAG_CREATE: &str =
    "tag/create: Creates a new tag.\nParameters: t/TAG\nExample: tag/create t/Physics";
pub const USAGE_TAG_DELETE: &str = "tag/delete: Deletes an existing tag and removes it from \
     every person.\nParameters: t/TAG\nExample: tag/delete t/Physics";
pub const USAGE_TAG_ASSIGN: &str = "tag/assign: Assigns a tag to one or more persons.\n\
     Parameters: INDEX [INDEX]... t/TAG\nExample: tag/assign 1 2 t/Physics";
pub const USAGE_TAG_UNASSIGN: &str = "tag/unassign: Unassigns a tag from one or more persons.\n\
     Parameters: INDEX [INDEX]... t/TAG\nExample: tag/unassign 1 t/Physics";
pub const USAGE_TAG_LIST: &str = "tag/list: Lists all tags.\nExample: tag/list";
pub const USAGE_NOTE_CREATE: &str = "note/create: Adds a note to the student at the specified \
     index.\nParameters: INDEX (must be a positive integer) r/NOTE\nExample: note/create 1 \
     r/Needs improvement in math.";
pub const USAGE_NOTE_DELETE: &str = "note/delete: Deletes the note of the student at the \
     specified index.\nParameters: INDEX (must be a positive integer)\nExample: note/delete 1";
pub const USAGE_STATS: &str = "stats: Shows roster statistics.\nExample: stats";
pub const USAGE_HELP: &str = "help: Shows program usage instructions.\nExample: help";
pub const USAGE_EXIT: &str = "exit: Exits the program.\nExample: exit";

/// Usage lines in the order the help text lists them.
pub const HELP_USAGES: &[&str] = &[
    USAGE_ADD,
    USAGE_EDIT,
    USAGE_DELETE,
    USAGE_FIND,
    USAGE_FIND_TAG,
    USAGE_SORT,
    USAGE_LIST,
    USAGE_CLEAR,
    USAGE_GROUP_CREATE,
    USAGE_GROUP_DELETE,
    USAGE_GROUP_ASSIGN,
    USAGE_GROUP_UNASSIGN,
    USAGE_GROUP_LIST,
    USAGE_TAG_CREATE,
    USAGE_TAG_DELETE,
    USAGE_TAG_ASSIGN,
    USAGE_TAG_UNASSIGN,
    USAGE_TAG_LIST,
    USAGE_NOTE_CREATE,
    USAGE_NOTE_DELETE,
    USAGE_STATS,
    USAGE_HELP,
    USAGE_EXIT,
];

/// Full help text: one usage block per command separated by blank lines.
pub fn help_text() -> String {
    HELP_USAGES.join("\n\n")
}

pub fn format_invalid_format(usage: &str) -> String {
    format!("{MESSAGE_INVALID_COMMAND_FORMAT}\n{usage}")
}

pub fn format_persons_listed(count: usize) -> String {
    format!("{count} persons listed!")
}

pub fn format_person_added(person: &Person) -> String {
    format!("New person added: {person}")
}

pub fn format_person_edited(person: &Person) -> String {
    format!("Edited Person: {person}")
}

pub fn format_person_deleted(person: &Person) -> String {
    format!("Deleted Person: {person}")
}

pub fn format_note_added(person: &Person) -> String {
    format!("Added note to Person: {person}")
}

pub fn format_note_deleted(person: &Person) -> String {
    format!("Deleted note from Person: {person}")
}

pub fn format_missing_tags(names: &[String]) -> String {
    format!(
        "Tags do not exist: {}. Please create them first using tag/create.",
        names.join(", ")
    )
}

pub fn format_missing_groups(names: &[String]) -> String {
    format!(
        "Groups do not exist: {}. Please create them first using group/create.",
        names.join(", ")
    )
}

pub fn format_save_failed(details: &str) -> String {
    format!("Could not save data due to the following error: {details}")
}

pub fn format_save_permission_denied(path: &str) -> String {
    format!(
        "Could not save data to file {path} due to insufficient permissions to write to the file \
         or the folder."
    )
}
