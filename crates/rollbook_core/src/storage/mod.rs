//! Roster persistence behind a narrow load/save contract.
//!
//! # Responsibility
//! - Define the [`RosterStorage`] seam the execution facade saves through.
//! - Provide JSON-file and SQLite backends of the same snapshot shape.
//! - Classify write failures so callers can tell permission problems
//!   from other I/O errors.
//!
//! # Invariants
//! - A missing backing store loads as `None`, never as an error.
//! - `save` replaces the whole stored snapshot or leaves it untouched.

mod json_store;
mod snapshot;
mod sqlite_store;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub use json_store::JsonRosterStorage;
pub use snapshot::{GroupRecord, PersonRecord, RosterSnapshot, TagRecord};
pub use sqlite_store::SqliteRosterStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence-layer failure.
#[derive(Debug)]
pub enum StorageError {
    /// The process may not write the file or its folder.
    PermissionDenied { path: PathBuf },
    /// Any other filesystem failure.
    Io { path: PathBuf, source: io::Error },
    /// JSON encoding or decoding failed.
    Serialization(serde_json::Error),
    /// SQLite backend failure.
    Db(DbError),
    /// Snapshot decoded but violates roster rules.
    InvalidData(String),
}

impl StorageError {
    /// Classifies an I/O error, splitting out permission problems.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { path } => {
                write!(f, "permission denied for `{}`", path.display())
            }
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Serialization(err) => write!(f, "invalid snapshot encoding: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(details) => write!(f, "invalid snapshot data: {details}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::PermissionDenied { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Load/save contract for roster snapshots.
pub trait RosterStorage {
    /// Human-readable location used in messages and logs.
    fn location(&self) -> &Path;

    /// Reads the stored snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> StorageResult<Option<RosterSnapshot>>;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &RosterSnapshot) -> StorageResult<()>;
}

impl<S: RosterStorage + ?Sized> RosterStorage for Box<S> {
    fn location(&self) -> &Path {
        (**self).location()
    }

    fn load(&self) -> StorageResult<Option<RosterSnapshot>> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> StorageResult<()> {
        (**self).save(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::StorageError;
    use std::io;

    #[test]
    fn permission_errors_are_classified_separately() {
        let denied = StorageError::from_io(
            "data/rollbook.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(denied.is_permission_denied());

        let other = StorageError::from_io("data/rollbook.json", io::Error::other("disk full"));
        assert!(!other.is_permission_denied());
    }
}
