//! Command model and execution.
//!
//! # Responsibility
//! - Define the closed command set and its execution rules.
//! - Own the session state (roster plus clear confirmation).
//! - Expose the [`LogicManager`] facade used by front ends.
//!
//! # Invariants
//! - Parse failures happen before any mutation.
//! - Every user-facing string comes from [`messages`].

pub mod clear;
pub mod command;
mod group_ops;
pub mod manager;
pub mod messages;
pub mod person_ops;
pub mod session;
mod tag_ops;

use crate::parser::ParseError;
use command::CommandError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use manager::LogicManager;

/// Failure surfaced to the presentation layer for one input line.
#[derive(Debug)]
pub enum LogicError {
    /// Input was malformed; nothing changed.
    Parse(ParseError),
    /// Input was valid but could not be applied or saved.
    Command(CommandError),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
        }
    }
}

impl From<ParseError> for LogicError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for LogicError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}
