//! One-based list position as typed by users.

use std::fmt::{Display, Formatter};

/// Position in a displayed list. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    /// Builds an index from a one-based position; `0` is rejected.
    pub fn from_one_based(position: usize) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    /// Builds an index from a zero-based offset.
    pub fn from_zero_based(offset: usize) -> Self {
        Self(offset + 1)
    }

    pub fn one_based(self) -> usize {
        self.0
    }

    pub fn zero_based(self) -> usize {
        self.0 - 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
