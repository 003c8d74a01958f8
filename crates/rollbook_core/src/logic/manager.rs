//! Execution facade: parse, execute, persist.
//!
//! # Responsibility
//! - Reset the clear confirmation before every non-`clear` input.
//! - Run one command to completion, then save the roster snapshot.
//! - Emit one `command_execute` event per input.
//!
//! # Invariants
//! - The confirmation reset happens even when the input later fails.
//! - A failed save never rolls back the in-memory change.
//! - Parse failures never reach storage.

use super::clear::is_clear_input;
use super::command::{CommandError, CommandOutput};
use super::session::Session;
use super::LogicError;
use crate::model::roster::Roster;
use crate::model::stats::RosterStats;
use crate::parser::parse_command;
use crate::storage::{RosterSnapshot, RosterStorage, StorageResult};
use log::{info, warn};
use std::time::Instant;

/// Single writer for one session's roster.
pub struct LogicManager<S: RosterStorage> {
    session: Session,
    storage: S,
}

impl<S: RosterStorage> LogicManager<S> {
    /// Creates a facade over an already loaded roster.
    pub fn new(roster: Roster, storage: S) -> Self {
        Self {
            session: Session::new(roster),
            storage,
        }
    }

    /// Loads the stored roster, starting empty when nothing was saved yet.
    ///
    /// # Errors
    /// - Any `StorageError` from reading or rebuilding the snapshot.
    pub fn from_storage(storage: S) -> StorageResult<Self> {
        let roster = match storage.load()? {
            Some(snapshot) => snapshot.into_roster()?,
            None => {
                info!(
                    "event=roster_load module=logic status=empty location={}",
                    storage.location().display()
                );
                Roster::new()
            }
        };
        Ok(Self::new(roster, storage))
    }

    /// Parses and executes one line of input, then saves.
    ///
    /// # Errors
    /// - `LogicError::Parse` for malformed input.
    /// - `LogicError::Command` when execution or saving fails.
    pub fn execute(&mut self, input: &str) -> Result<CommandOutput, LogicError> {
        let started_at = Instant::now();
        if !is_clear_input(input) {
            self.session.clear_state_mut().reset();
        }

        let command = match parse_command(input) {
            Ok(command) => command,
            Err(err) => {
                info!(
                    "event=command_execute module=logic status=error stage=parse duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };
        let kind = command.keyword();

        let output = match command.execute(&mut self.session) {
            Ok(output) => output,
            Err(err) => {
                info!(
                    "event=command_execute module=logic status=error stage=execute kind={} duration_ms={}",
                    kind,
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        let snapshot = RosterSnapshot::from_roster(self.session.roster());
        if let Err(err) = self.storage.save(&snapshot) {
            warn!(
                "event=command_execute module=logic status=error stage=save kind={} duration_ms={} error={}",
                kind,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(CommandError::Storage(err).into());
        }

        info!(
            "event=command_execute module=logic status=ok kind={} duration_ms={}",
            kind,
            started_at.elapsed().as_millis()
        );
        Ok(output)
    }

    pub fn roster(&self) -> &Roster {
        self.session.roster()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.session.clear_state().is_pending()
    }

    /// Statistics over the whole roster, for the `stats` report.
    pub fn stats(&self) -> RosterStats {
        RosterStats::compute(self.session.roster())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
