//! Typed value parsing shared by the per-command parsers.

use super::ParseError;
use crate::model::group::Group;
use crate::model::index::Index;
use crate::model::person::{Address, Email, Name, Note, Phone};
use crate::model::tag::Tag;
use crate::model::ValidationError;

/// Parses a one-based index. Leading and trailing whitespace is ignored.
pub fn parse_index(raw: &str) -> Option<Index> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
}

/// Parses a single index or fails with the command's usage.
pub fn require_index(raw: &str, usage: &'static str) -> Result<Index, ParseError> {
    parse_index(raw).ok_or(ParseError::InvalidFormat { usage })
}

/// Parses a whitespace-separated, non-empty index list.
pub fn require_indices(raw: &str, usage: &'static str) -> Result<Vec<Index>, ParseError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    tokens
        .into_iter()
        .map(|token| require_index(token, usage))
        .collect()
}

pub fn parse_name(raw: &str, usage: &'static str) -> Result<Name, ParseError> {
    Name::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_phone(raw: &str, usage: &'static str) -> Result<Phone, ParseError> {
    Phone::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_email(raw: &str, usage: &'static str) -> Result<Email, ParseError> {
    Email::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_address(raw: &str, usage: &'static str) -> Result<Address, ParseError> {
    Address::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_note(raw: &str, usage: &'static str) -> Result<Note, ParseError> {
    Note::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_tag(raw: &str, usage: &'static str) -> Result<Tag, ParseError> {
    Tag::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

pub fn parse_group(raw: &str, usage: &'static str) -> Result<Group, ParseError> {
    Group::new(raw.trim()).map_err(|err| invalid_value(err, usage))
}

/// Parses every raw tag, keeping input order and case-insensitive first
/// occurrences only.
pub fn parse_tags(raws: &[String], usage: &'static str) -> Result<Vec<Tag>, ParseError> {
    let mut tags: Vec<Tag> = Vec::new();
    for raw in raws {
        let tag = parse_tag(raw, usage)?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

pub fn parse_groups(raws: &[String], usage: &'static str) -> Result<Vec<Group>, ParseError> {
    let mut groups: Vec<Group> = Vec::new();
    for raw in raws {
        let group = parse_group(raw, usage)?;
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    Ok(groups)
}

fn invalid_value(err: ValidationError, usage: &'static str) -> ParseError {
    ParseError::InvalidValue {
        message: err.constraint,
        usage,
    }
}
