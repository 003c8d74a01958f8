//! Two-step confirmation guarding the bulk `clear`.
//!
//! # Invariants
//! - State is session-scoped and never persisted.
//! - Only `Idle -> PendingConfirm -> Idle` is possible; every other
//!   command resets to `Idle` before it runs.

/// Confirmation state for the destructive clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearConfirmation {
    #[default]
    Idle,
    PendingConfirm,
}

impl ClearConfirmation {
    pub fn is_pending(self) -> bool {
        self == Self::PendingConfirm
    }

    /// Records a `clear` request.
    ///
    /// Returns `true` when this call started the confirmation, `false`
    /// when one was already pending.
    pub fn request(&mut self) -> bool {
        let first = *self == Self::Idle;
        *self = Self::PendingConfirm;
        first
    }

    /// Consumes a pending confirmation. Returns `false` (state unchanged)
    /// when nothing was requested.
    pub fn confirm(&mut self) -> bool {
        if self.is_pending() {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

/// Whether `input` is addressed to the clear state machine itself and
/// must not reset it: exactly `clear`, or `clear` followed by a space.
pub fn is_clear_input(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed == "clear" || trimmed.starts_with("clear ")
}

#[cfg(test)]
mod tests {
    use super::{is_clear_input, ClearConfirmation};

    #[test]
    fn request_then_confirm_returns_to_idle() {
        let mut state = ClearConfirmation::default();
        assert!(state.request());
        assert!(!state.request());
        assert!(state.is_pending());
        assert!(state.confirm());
        assert_eq!(state, ClearConfirmation::Idle);
    }

    #[test]
    fn confirm_without_request_is_refused() {
        let mut state = ClearConfirmation::Idle;
        assert!(!state.confirm());
        assert_eq!(state, ClearConfirmation::Idle);
    }

    #[test]
    fn only_clear_keyword_is_exempt_from_reset() {
        assert!(is_clear_input("clear"));
        assert!(is_clear_input("  clear confirm"));
        assert!(is_clear_input("clear bogus"));
        assert!(!is_clear_input("clear\tconfirm"));
        assert!(!is_clear_input("clear\nconfirm"));
        assert!(!is_clear_input("clearall"));
        assert!(!is_clear_input("list"));
        assert!(!is_clear_input(""));
    }
}
