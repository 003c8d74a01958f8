//! Parsers for commands that take no arguments, plus `clear`.

use super::{ParseError, ParseResult};
use crate::logic::command::Command;

/// Parameterless keywords. Any trailing text is rejected.
pub fn parse_singular(keyword: &str, args: &str) -> ParseResult<Command> {
    if !args.trim().is_empty() {
        return Err(ParseError::ExtraArguments);
    }
    match keyword {
        "sort" => Ok(Command::Sort),
        "list" => Ok(Command::List),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        "stats" => Ok(Command::Stats),
        "group/list" => Ok(Command::GroupList),
        "tag/list" => Ok(Command::TagList),
        _ => Err(ParseError::UnknownCommand),
    }
}

/// `clear` or `clear confirm`.
pub fn parse_clear(args: &str) -> ParseResult<Command> {
    match args.trim() {
        "" => Ok(Command::Clear { confirmed: false }),
        "confirm" => Ok(Command::Clear { confirmed: true }),
        _ => Err(ParseError::ExtraArguments),
    }
}
