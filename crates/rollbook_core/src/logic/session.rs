//! Mutable state owned by one interactive session.

use super::clear::ClearConfirmation;
use crate::model::roster::Roster;

/// Roster plus the session-only clear confirmation flag.
#[derive(Debug, Clone, Default)]
pub struct Session {
    roster: Roster,
    clear: ClearConfirmation,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            clear: ClearConfirmation::Idle,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn clear_state(&self) -> ClearConfirmation {
        self.clear
    }

    pub fn clear_state_mut(&mut self) -> &mut ClearConfirmation {
        &mut self.clear
    }

    /// Split borrow used by `clear`, which touches both halves.
    pub(crate) fn parts_mut(&mut self) -> (&mut Roster, &mut ClearConfirmation) {
        (&mut self.roster, &mut self.clear)
    }
}
