//! Pretty-printed JSON file backend.
//!
//! # Invariants
//! - A save writes a sibling temp file and renames it over the target,
//!   so readers see either the old document or the new one.

use super::{RosterSnapshot, RosterStorage, StorageError, StorageResult};
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Stores the snapshot as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonRosterStorage {
    path: PathBuf,
}

impl JsonRosterStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterStorage for JsonRosterStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Option<RosterSnapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=storage_load module=storage status=ok backend=json found=false");
                return Ok(None);
            }
            Err(err) => return Err(StorageError::from_io(&self.path, err)),
        };
        let snapshot: RosterSnapshot = serde_json::from_str(&text)?;
        info!(
            "event=storage_load module=storage status=ok backend=json found=true persons={}",
            snapshot.persons.len()
        );
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = write_snapshot(&self.path, snapshot);
        match &result {
            Ok(()) => info!(
                "event=storage_save module=storage status=ok backend=json persons={} duration_ms={}",
                snapshot.persons.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=storage_save module=storage status=error backend=json permission_denied={} duration_ms={}",
                err.is_permission_denied(),
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

fn write_snapshot(path: &Path, snapshot: &RosterSnapshot) -> StorageResult<()> {
    let parent = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|err| StorageError::from_io(parent, err))?;
            parent
        }
        None => Path::new("."),
    };
    let encoded = serde_json::to_string_pretty(snapshot)?;

    let mut staged =
        NamedTempFile::new_in(parent).map_err(|err| StorageError::from_io(parent, err))?;
    staged
        .write_all(encoded.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|err| StorageError::from_io(staged.path(), err))?;
    staged
        .persist(path)
        .map_err(|err| StorageError::from_io(path, err.error))?;
    Ok(())
}
