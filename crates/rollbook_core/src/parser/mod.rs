//! Command-line parser: raw text into a typed [`Command`].
//!
//! # Responsibility
//! - Split the keyword from its argument text.
//! - Route each keyword to its argument parser.
//! - Validate every value before a command is constructed.
//!
//! # Invariants
//! - Parsing never touches roster state; failures have no side effects.
//! - Unknown keywords fail with `UnknownCommand`, never with a usage text.
//!
//! # See also
//! - `logic::messages` for usage strings.

pub mod label;
pub mod person;
pub mod singular;
pub mod tokenizer;
pub mod values;

use crate::logic::command::Command;
use crate::logic::messages::{
    format_invalid_format, MESSAGE_DUPLICATE_FIELDS, MESSAGE_EXTRA_ARGUMENTS,
    MESSAGE_NOT_EDITED, MESSAGE_SINGLE_PARAMETER_ONLY, MESSAGE_UNKNOWN_COMMAND,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokenizer::Prefix;

pub type ParseResult<T> = Result<T, ParseError>;

/// Malformed user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Keyword is not a known command.
    UnknownCommand,
    /// Arguments do not fit the command's shape.
    InvalidFormat { usage: &'static str },
    /// A value failed its format constraint.
    InvalidValue {
        message: &'static str,
        usage: &'static str,
    },
    /// A parameterless command received arguments.
    ExtraArguments,
    /// `find` received both or repeated search prefixes.
    SingleParameterOnly,
    /// Single-valued prefixes given more than once.
    DuplicatePrefixes(Vec<Prefix>),
    /// `edit` received no field to change.
    NothingToEdit,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand => f.write_str(MESSAGE_UNKNOWN_COMMAND),
            Self::InvalidFormat { usage } => f.write_str(&format_invalid_format(usage)),
            Self::InvalidValue { message, .. } => f.write_str(message),
            Self::ExtraArguments => f.write_str(MESSAGE_EXTRA_ARGUMENTS),
            Self::SingleParameterOnly => f.write_str(MESSAGE_SINGLE_PARAMETER_ONLY),
            Self::DuplicatePrefixes(prefixes) => {
                let joined: Vec<&str> = prefixes.iter().map(|prefix| prefix.as_str()).collect();
                write!(f, "{MESSAGE_DUPLICATE_FIELDS}{}", joined.join(" "))
            }
            Self::NothingToEdit => f.write_str(MESSAGE_NOT_EDITED),
        }
    }
}

impl Error for ParseError {}

/// Parses one line of user input.
pub fn parse_command(input: &str) -> ParseResult<Command> {
    let trimmed = input.trim();
    let (keyword, args) = match trimmed.find(char::is_whitespace) {
        Some(split) => trimmed.split_at(split),
        None => (trimmed, ""),
    };
    debug!(
        "event=command_parse module=parser status=start keyword={} args_len={}",
        keyword,
        args.len()
    );

    match keyword {
        "add" => person::parse_add(args),
        "edit" => person::parse_edit(args),
        "delete" => person::parse_delete(args),
        "find" => person::parse_find(args),
        "findtag" => person::parse_find_tag(args),
        "note/create" => person::parse_note_create(args),
        "note/delete" => person::parse_note_delete(args),
        "group/create" => label::parse_group_create(args),
        "group/delete" => label::parse_group_delete(args),
        "group/assign" => label::parse_group_assign(args),
        "group/unassign" => label::parse_group_unassign(args),
        "tag/create" => label::parse_tag_create(args),
        "tag/delete" => label::parse_tag_delete(args),
        "tag/assign" => label::parse_tag_assign(args),
        "tag/unassign" => label::parse_tag_unassign(args),
        "clear" => singular::parse_clear(args),
        "sort" | "list" | "help" | "exit" | "stats" | "group/list" | "tag/list" => {
            singular::parse_singular(keyword, args)
        }
        _ => {
            debug!("event=command_parse module=parser status=error reason=unknown_command");
            Err(ParseError::UnknownCommand)
        }
    }
}
