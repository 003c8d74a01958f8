//! Core logic for Rollbook, a command-driven class roster.
//! Front ends hand raw command lines to [`LogicManager`] and render the
//! returned feedback; every roster rule lives in this crate.

pub mod config;
pub mod db;
pub mod logging;
pub mod logic;
pub mod model;
pub mod parser;
pub mod storage;

pub use config::{AppConfig, ConfigError, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status};
pub use logic::command::{Command, CommandError, CommandOutput};
pub use logic::messages::help_text;
pub use logic::{LogicError, LogicManager};
pub use model::group::Group;
pub use model::person::Person;
pub use model::roster::Roster;
pub use model::stats::RosterStats;
pub use model::tag::Tag;
pub use parser::{parse_command, ParseError};
pub use storage::{
    JsonRosterStorage, RosterSnapshot, RosterStorage, SqliteRosterStorage, StorageError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
