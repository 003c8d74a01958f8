//! SQLite backend storing the snapshot in normalized tables.
//!
//! # Invariants
//! - `save` rewrites every table inside one transaction.
//! - A database without a `roster_meta` row has never been saved and loads
//!   as `None`.

use super::{
    GroupRecord, PersonRecord, RosterSnapshot, RosterStorage, StorageError, StorageResult,
    TagRecord,
};
use crate::db::{open_db, open_db_in_memory, DbError};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Roster snapshot persisted in a migrated SQLite file.
pub struct SqliteRosterStorage {
    path: PathBuf,
    conn: Connection,
}

impl SqliteRosterStorage {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::from_io(parent, err))?;
        }
        let conn = open_db(&path).map_err(|err| classify(&path, err))?;
        Ok(Self { path, conn })
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    fn read_snapshot(&self) -> Result<Option<RosterSnapshot>, DbError> {
        let saved: Option<i64> = self
            .conn
            .query_row("SELECT saved_at_ms FROM roster_meta WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;
        if saved.is_none() {
            return Ok(None);
        }

        let groups = self.read_names("SELECT name FROM roster_groups ORDER BY position;")?;
        let tags = self.read_names("SELECT name FROM roster_tags ORDER BY position;")?;
        let mut person_groups = self.read_refs(
            "SELECT person_position, group_name FROM person_groups
             ORDER BY person_position, ordinal;",
        )?;
        let mut person_tags = self.read_refs(
            "SELECT person_position, tag_name FROM person_tags
             ORDER BY person_position, ordinal;",
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT position, name, phone, email, address, note FROM persons ORDER BY position;",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                PersonRecord {
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    email: row.get(3)?,
                    address: row.get(4)?,
                    note: row.get(5)?,
                    tags: Vec::new(),
                    groups: Vec::new(),
                },
            ))
        })?;
        let mut persons = Vec::new();
        for row in rows {
            let (position, mut record) = row?;
            record.groups = person_groups.remove(&position).unwrap_or_default();
            record.tags = person_tags.remove(&position).unwrap_or_default();
            persons.push(record);
        }

        Ok(Some(RosterSnapshot {
            persons,
            groups: groups.into_iter().map(|name| GroupRecord { name }).collect(),
            tags: tags.into_iter().map(|name| TagRecord { name }).collect(),
        }))
    }

    fn read_names(&self, sql: &str) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn read_refs(&self, sql: &str) -> Result<HashMap<i64, Vec<String>>, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut refs: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let (position, name) = row?;
            refs.entry(position).or_default().push(name);
        }
        Ok(refs)
    }

    fn write_snapshot(&mut self, snapshot: &RosterSnapshot) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM person_tags;
             DELETE FROM person_groups;
             DELETE FROM persons;
             DELETE FROM roster_groups;
             DELETE FROM roster_tags;",
        )?;

        {
            let mut insert_group =
                tx.prepare("INSERT INTO roster_groups (position, name) VALUES (?1, ?2);")?;
            for (position, group) in snapshot.groups.iter().enumerate() {
                insert_group.execute(params![position as i64, group.name])?;
            }
            let mut insert_tag = tx.prepare("INSERT INTO roster_tags (position, name) VALUES (?1, ?2);")?;
            for (position, tag) in snapshot.tags.iter().enumerate() {
                insert_tag.execute(params![position as i64, tag.name])?;
            }

            let mut insert_person = tx.prepare(
                "INSERT INTO persons (position, name, phone, email, address, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            let mut insert_person_group = tx.prepare(
                "INSERT INTO person_groups (person_position, ordinal, group_name)
                 VALUES (?1, ?2, ?3);",
            )?;
            let mut insert_person_tag = tx.prepare(
                "INSERT INTO person_tags (person_position, ordinal, tag_name)
                 VALUES (?1, ?2, ?3);",
            )?;
            for (position, person) in snapshot.persons.iter().enumerate() {
                let position = position as i64;
                insert_person.execute(params![
                    position,
                    person.name,
                    person.phone,
                    person.email,
                    person.address,
                    person.note
                ])?;
                for (ordinal, name) in person.groups.iter().enumerate() {
                    insert_person_group.execute(params![position, ordinal as i64, name])?;
                }
                for (ordinal, name) in person.tags.iter().enumerate() {
                    insert_person_tag.execute(params![position, ordinal as i64, name])?;
                }
            }
        }

        tx.execute(
            "INSERT INTO roster_meta (id, saved_at_ms) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET saved_at_ms = excluded.saved_at_ms;",
            [now_epoch_ms()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl RosterStorage for SqliteRosterStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Option<RosterSnapshot>> {
        let snapshot = self
            .read_snapshot()
            .map_err(|err| classify(&self.path, err))?;
        info!(
            "event=storage_load module=storage status=ok backend=sqlite found={}",
            snapshot.is_some()
        );
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> StorageResult<()> {
        let started_at = Instant::now();
        match self.write_snapshot(snapshot) {
            Ok(()) => {
                info!(
                    "event=storage_save module=storage status=ok backend=sqlite persons={} duration_ms={}",
                    snapshot.persons.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_save module=storage status=error backend=sqlite permission_denied={} duration_ms={} error={}",
                    err.is_permission_denied(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(classify(&self.path, err))
            }
        }
    }
}

fn classify(path: &Path, err: DbError) -> StorageError {
    if err.is_permission_denied() {
        StorageError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        StorageError::Db(err)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::SqliteRosterStorage;
    use crate::storage::{PersonRecord, RosterSnapshot, RosterStorage, TagRecord};

    #[test]
    fn fresh_database_loads_as_none() {
        let storage = SqliteRosterStorage::open_in_memory().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn saved_empty_roster_loads_as_some() {
        let mut storage = SqliteRosterStorage::open_in_memory().unwrap();
        storage.save(&RosterSnapshot::default()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(RosterSnapshot::default()));
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let mut storage = SqliteRosterStorage::open_in_memory().unwrap();
        let first = RosterSnapshot {
            persons: vec![PersonRecord {
                name: "Alice".to_string(),
                tags: vec!["friends".to_string()],
                ..PersonRecord::default()
            }],
            tags: vec![TagRecord {
                name: "friends".to_string(),
            }],
            ..RosterSnapshot::default()
        };
        storage.save(&first).unwrap();

        let second = RosterSnapshot {
            persons: vec![PersonRecord {
                name: "Bob".to_string(),
                phone: Some("98765432".to_string()),
                ..PersonRecord::default()
            }],
            ..RosterSnapshot::default()
        };
        storage.save(&second).unwrap();
        assert_eq!(storage.load().unwrap(), Some(second));
    }
}
