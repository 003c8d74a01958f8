//! Argument parsers for group and tag commands.

use super::tokenizer::{tokenize, ArgumentMultimap, Prefix, PREFIX_GROUP, PREFIX_TAG};
use super::values::{parse_group, parse_tag, require_indices};
use super::{ParseError, ParseResult};
use crate::logic::command::Command;
use crate::logic::messages::{
    USAGE_GROUP_ASSIGN, USAGE_GROUP_CREATE, USAGE_GROUP_DELETE, USAGE_GROUP_UNASSIGN,
    USAGE_TAG_ASSIGN, USAGE_TAG_CREATE, USAGE_TAG_DELETE, USAGE_TAG_UNASSIGN,
};
use crate::model::index::Index;

/// `group/create g/GROUP`
pub fn parse_group_create(args: &str) -> ParseResult<Command> {
    let raw = single_label(args, PREFIX_GROUP, USAGE_GROUP_CREATE)?;
    let group = parse_group(&raw, USAGE_GROUP_CREATE)?;
    Ok(Command::GroupCreate { group })
}

/// `group/delete g/GROUP`
pub fn parse_group_delete(args: &str) -> ParseResult<Command> {
    let raw = single_label(args, PREFIX_GROUP, USAGE_GROUP_DELETE)?;
    let group = parse_group(&raw, USAGE_GROUP_DELETE)?;
    Ok(Command::GroupDelete { group })
}

/// `group/assign INDEX [INDEX]... g/GROUP`
pub fn parse_group_assign(args: &str) -> ParseResult<Command> {
    let (indices, raw) = indexed_label(args, PREFIX_GROUP, USAGE_GROUP_ASSIGN)?;
    let group = parse_group(&raw, USAGE_GROUP_ASSIGN)?;
    Ok(Command::GroupAssign { group, indices })
}

/// `group/unassign INDEX [INDEX]... g/GROUP`
pub fn parse_group_unassign(args: &str) -> ParseResult<Command> {
    let (indices, raw) = indexed_label(args, PREFIX_GROUP, USAGE_GROUP_UNASSIGN)?;
    let group = parse_group(&raw, USAGE_GROUP_UNASSIGN)?;
    Ok(Command::GroupUnassign { group, indices })
}

/// `tag/create t/TAG`
pub fn parse_tag_create(args: &str) -> ParseResult<Command> {
    let raw = single_label(args, PREFIX_TAG, USAGE_TAG_CREATE)?;
    let tag = parse_tag(&raw, USAGE_TAG_CREATE)?;
    Ok(Command::TagCreate { tag })
}

/// `tag/delete t/TAG`
pub fn parse_tag_delete(args: &str) -> ParseResult<Command> {
    let raw = single_label(args, PREFIX_TAG, USAGE_TAG_DELETE)?;
    let tag = parse_tag(&raw, USAGE_TAG_DELETE)?;
    Ok(Command::TagDelete { tag })
}

/// `tag/assign INDEX [INDEX]... t/TAG`
pub fn parse_tag_assign(args: &str) -> ParseResult<Command> {
    let (indices, raw) = indexed_label(args, PREFIX_TAG, USAGE_TAG_ASSIGN)?;
    let tag = parse_tag(&raw, USAGE_TAG_ASSIGN)?;
    Ok(Command::TagAssign { tag, indices })
}

/// `tag/unassign INDEX [INDEX]... t/TAG`
pub fn parse_tag_unassign(args: &str) -> ParseResult<Command> {
    let (indices, raw) = indexed_label(args, PREFIX_TAG, USAGE_TAG_UNASSIGN)?;
    let tag = parse_tag(&raw, USAGE_TAG_UNASSIGN)?;
    Ok(Command::TagUnassign { tag, indices })
}

/// Label given exactly once, with no preamble.
fn single_label(args: &str, prefix: Prefix, usage: &'static str) -> ParseResult<String> {
    let map = tokenize(args, &[prefix]);
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    required_label(&map, prefix, usage)
}

/// Index list in the preamble plus a label given exactly once.
fn indexed_label(
    args: &str,
    prefix: Prefix,
    usage: &'static str,
) -> ParseResult<(Vec<Index>, String)> {
    let map = tokenize(args, &[prefix]);
    let raw = required_label(&map, prefix, usage)?;
    let indices = require_indices(map.preamble(), usage)?;
    Ok((indices, raw))
}

fn required_label(
    map: &ArgumentMultimap,
    prefix: Prefix,
    usage: &'static str,
) -> ParseResult<String> {
    map.verify_no_duplicate_prefixes(&[prefix])?;
    match map.value(prefix) {
        Some(raw) if !raw.is_empty() => Ok(raw.to_string()),
        _ => Err(ParseError::InvalidFormat { usage }),
    }
}
