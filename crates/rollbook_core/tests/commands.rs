use rollbook_core::logic::messages::{
    format_missing_groups, format_missing_tags, format_save_permission_denied,
    MESSAGE_DUPLICATE_PERSON, MESSAGE_GROUP_NOT_FOUND, MESSAGE_INVALID_PERSON_DISPLAYED_INDEX,
    MESSAGE_LISTED_GROUPS, MESSAGE_LISTED_PERSONS, MESSAGE_LISTED_TAGS, MESSAGE_SORTED,
    MESSAGE_TAG_NOT_FOUND,
};
use rollbook_core::storage::{RosterSnapshot, RosterStorage, StorageError, StorageResult};
use rollbook_core::{CommandError, LogicError, LogicManager, Roster};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Default)]
struct MemoryStorage {
    path: PathBuf,
    saved: Option<RosterSnapshot>,
    saves: usize,
}

impl RosterStorage for MemoryStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Option<RosterSnapshot>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> StorageResult<()> {
        self.saved = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

struct ReadOnlyStorage {
    path: PathBuf,
}

impl RosterStorage for ReadOnlyStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Option<RosterSnapshot>> {
        Ok(None)
    }

    fn save(&mut self, _snapshot: &RosterSnapshot) -> StorageResult<()> {
        Err(StorageError::PermissionDenied {
            path: self.path.clone(),
        })
    }
}

fn manager() -> LogicManager<MemoryStorage> {
    LogicManager::new(Roster::new(), MemoryStorage::default())
}

fn run(manager: &mut LogicManager<MemoryStorage>, input: &str) -> String {
    match manager.execute(input) {
        Ok(output) => output.feedback,
        Err(err) => panic!("`{input}` failed: {err}"),
    }
}

fn fail(manager: &mut LogicManager<MemoryStorage>, input: &str) -> LogicError {
    match manager.execute(input) {
        Ok(output) => panic!("`{input}` unexpectedly succeeded: {}", output.feedback),
        Err(err) => err,
    }
}

#[test]
fn add_requires_existing_tag_and_then_shares_canonical_instance() {
    let mut manager = manager();

    let err = fail(&mut manager, "add n/Alex Yeoh t/friends");
    assert_eq!(err.to_string(), format_missing_tags(&["friends".to_string()]));
    assert!(manager.roster().persons().is_empty());

    run(&mut manager, "tag/create t/friends");
    let feedback = run(&mut manager, "add n/Alex Yeoh p/87438807 t/friends");
    assert_eq!(
        feedback,
        "New person added: Alex Yeoh; Phone: 87438807; Tags: [friends]"
    );

    let roster = manager.roster();
    assert!(Rc::ptr_eq(&roster.persons()[0].tags()[0], &roster.tags()[0]));
}

#[test]
fn add_lists_every_missing_label_in_input_order() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/known");

    let err = fail(&mut manager, "add n/Amy t/zeta t/known t/Alpha");
    assert_eq!(
        err.to_string(),
        format_missing_tags(&["zeta".to_string(), "Alpha".to_string()])
    );

    let err = fail(&mut manager, "add n/Amy g/W12 g/T01");
    assert_eq!(
        err.to_string(),
        format_missing_groups(&["W12".to_string(), "T01".to_string()])
    );
}

#[test]
fn duplicate_person_is_a_command_failure() {
    let mut manager = manager();
    run(&mut manager, "add n/Bernice Yu");

    let err = fail(&mut manager, "add n/bernice yu e/berniceyu@example.com");
    assert!(matches!(
        err,
        LogicError::Command(CommandError::DuplicatePerson)
    ));
    assert_eq!(err.to_string(), MESSAGE_DUPLICATE_PERSON);
}

#[test]
fn batch_assign_validates_every_index_before_mutating() {
    let mut manager = manager();
    run(&mut manager, "group/create g/CS2103T");
    run(&mut manager, "add n/Alex Yeoh");
    run(&mut manager, "add n/Bernice Yu");

    let err = fail(&mut manager, "group/assign 1 3 g/CS2103T");
    assert_eq!(err.to_string(), MESSAGE_INVALID_PERSON_DISPLAYED_INDEX);
    for stored in manager.roster().persons() {
        assert!(stored.groups().is_empty());
    }
}

#[test]
fn batch_assign_skips_existing_holders_in_tally() {
    let mut manager = manager();
    run(&mut manager, "group/create g/CS2103T");
    run(&mut manager, "add n/Alex Yeoh g/CS2103T");
    run(&mut manager, "add n/Bernice Yu");

    let feedback = run(&mut manager, "group/assign 1 2 2 g/cs2103t");
    assert_eq!(feedback, "Assigned group [CS2103T] to 1 person(s)");
    let roster = manager.roster();
    for stored in roster.persons() {
        assert_eq!(stored.groups().len(), 1);
        assert!(Rc::ptr_eq(&stored.groups()[0], &roster.groups()[0]));
    }

    let feedback = run(&mut manager, "group/unassign 1 2 g/CS2103T");
    assert_eq!(feedback, "Unassigned group [CS2103T] from 2 person(s)");
}

#[test]
fn assign_to_unknown_group_fails_before_index_checks() {
    let mut manager = manager();
    run(&mut manager, "add n/Alex Yeoh");

    let err = fail(&mut manager, "group/assign 9 g/Ghost");
    assert_eq!(err.to_string(), MESSAGE_GROUP_NOT_FOUND);
}

#[test]
fn tag_batch_assign_validates_every_index_before_mutating() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "add n/Alex Yeoh");
    run(&mut manager, "add n/Bernice Yu");

    let err = fail(&mut manager, "tag/assign 1 3 t/friends");
    assert!(matches!(
        err,
        LogicError::Command(CommandError::InvalidPersonIndex)
    ));
    assert_eq!(err.to_string(), MESSAGE_INVALID_PERSON_DISPLAYED_INDEX);
    for stored in manager.roster().persons() {
        assert!(stored.tags().is_empty());
    }
}

#[test]
fn tag_batch_assign_skips_existing_holders_in_tally() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "add n/Alex Yeoh t/friends");
    run(&mut manager, "add n/Bernice Yu");

    let feedback = run(&mut manager, "tag/assign 1 2 2 t/FRIENDS");
    assert_eq!(feedback, "Assigned tag [friends] to 1 person(s)");
    let roster = manager.roster();
    for stored in roster.persons() {
        assert_eq!(stored.tags().len(), 1);
        assert!(Rc::ptr_eq(&stored.tags()[0], &roster.tags()[0]));
    }

    let feedback = run(&mut manager, "tag/unassign 1 2 t/friends");
    assert_eq!(feedback, "Unassigned tag [friends] from 2 person(s)");
    let feedback = run(&mut manager, "tag/unassign 1 t/friends");
    assert_eq!(feedback, "Unassigned tag [friends] from 0 person(s)");
    for stored in manager.roster().persons() {
        assert!(stored.tags().is_empty());
    }
}

#[test]
fn assign_to_unknown_tag_fails_before_index_checks() {
    let mut manager = manager();
    run(&mut manager, "add n/Alex Yeoh");

    let err = fail(&mut manager, "tag/assign 9 t/ghost");
    assert!(matches!(err, LogicError::Command(CommandError::TagNotFound)));
    assert_eq!(err.to_string(), MESSAGE_TAG_NOT_FOUND);
    assert_eq!(
        fail(&mut manager, "tag/unassign 1 t/ghost").to_string(),
        MESSAGE_TAG_NOT_FOUND
    );
}

#[test]
fn findtag_narrows_to_holders_of_the_tag() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "tag/create t/bestfriends");
    run(&mut manager, "add n/Alex Yeoh t/friends");
    run(&mut manager, "add n/Bernice Yu t/bestfriends");
    run(&mut manager, "add n/Charlotte Oliveiro t/Friends");

    assert_eq!(run(&mut manager, "findtag t/FRIENDS"), "2 persons listed!");
    let names: Vec<&str> = manager
        .roster()
        .filtered_persons()
        .iter()
        .map(|stored| stored.name().as_str())
        .collect();
    assert_eq!(names, vec!["Alex Yeoh", "Charlotte Oliveiro"]);

    run(&mut manager, "note/create 2 r/Check attendance");
    assert_eq!(
        manager.roster().persons()[2].note().as_str(),
        "Check attendance"
    );
    assert_eq!(run(&mut manager, "findtag t/unused"), "0 persons listed!");
}

#[test]
fn find_by_group_narrows_persons_and_groups_until_group_list() {
    let mut manager = manager();
    run(&mut manager, "group/create g/CS2103T");
    run(&mut manager, "group/create g/CS2101");
    run(&mut manager, "group/create g/W09");
    run(&mut manager, "add n/Alex Yeoh g/CS2103T");
    run(&mut manager, "add n/Bernice Yu g/W09");
    run(&mut manager, "add n/Charlotte Oliveiro g/CS2101 g/W09");

    assert_eq!(run(&mut manager, "find g/cs2103 cs2101"), "2 persons listed!");
    let roster = manager.roster();
    let names: Vec<&str> = roster
        .filtered_persons()
        .iter()
        .map(|stored| stored.name().as_str())
        .collect();
    assert_eq!(names, vec!["Alex Yeoh", "Charlotte Oliveiro"]);
    let groups: Vec<&str> = roster
        .filtered_groups()
        .iter()
        .map(|group| group.name())
        .collect();
    assert_eq!(groups, vec!["CS2103T", "CS2101"]);

    assert_eq!(run(&mut manager, "group/list"), MESSAGE_LISTED_GROUPS);
    let roster = manager.roster();
    assert_eq!(roster.filtered_groups().len(), roster.groups().len());
    assert_eq!(roster.filtered_persons().len(), 2);

    assert_eq!(run(&mut manager, "list"), MESSAGE_LISTED_PERSONS);
    assert_eq!(manager.roster().filtered_persons().len(), 3);
}

#[test]
fn tag_list_shows_every_registered_tag() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "tag/create t/owesMoney");

    assert_eq!(run(&mut manager, "tag/list"), MESSAGE_LISTED_TAGS);
    let tags: Vec<&str> = manager
        .roster()
        .filtered_tags()
        .iter()
        .map(|tag| tag.name())
        .collect();
    assert_eq!(tags, vec!["friends", "owesMoney"]);

    run(&mut manager, "tag/delete t/friends");
    assert_eq!(manager.roster().filtered_tags().len(), 1);
}

#[test]
fn delete_tag_cascades_to_persons() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "add n/Alex Yeoh t/friends");
    run(&mut manager, "add n/Bernice Yu t/FRIENDS");
    run(&mut manager, "add n/Charlotte Oliveiro");

    let feedback = run(&mut manager, "tag/delete t/Friends");
    assert_eq!(feedback, "Deleted tag: [friends] (removed from 2 person(s))");
    assert!(manager.roster().tags().is_empty());
    for stored in manager.roster().persons() {
        assert!(stored.tags().is_empty());
    }
}

#[test]
fn find_then_index_refers_to_filtered_list() {
    let mut manager = manager();
    run(&mut manager, "add n/Alex Yeoh");
    run(&mut manager, "add n/Bernice Yu");
    run(&mut manager, "add n/Alexis Tan");

    assert_eq!(run(&mut manager, "find n/yu"), "1 persons listed!");
    let feedback = run(&mut manager, "note/create 1 r/Needs consultation");
    assert_eq!(
        feedback,
        "Added note to Person: Bernice Yu; Note: Needs consultation"
    );

    assert_eq!(run(&mut manager, "find n/ALEX"), "2 persons listed!");
    run(&mut manager, "delete 2");
    assert_eq!(run(&mut manager, "list"), MESSAGE_LISTED_PERSONS);
    let names: Vec<&str> = manager
        .roster()
        .filtered_persons()
        .iter()
        .map(|stored| stored.name().as_str())
        .collect();
    assert_eq!(names, vec!["Alex Yeoh", "Bernice Yu"]);
}

#[test]
fn note_delete_keeps_person_and_empties_note() {
    let mut manager = manager();
    run(&mut manager, "add n/Alex Yeoh");
    run(&mut manager, "note/create 1 r/Late submission");

    let feedback = run(&mut manager, "note/delete 1");
    assert_eq!(feedback, "Deleted note from Person: Alex Yeoh");
    assert_eq!(manager.roster().persons().len(), 1);
    assert!(manager.roster().persons()[0].note().is_empty());
}

#[test]
fn edit_replaces_fields_and_clears_tags() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "add n/Alex Yeoh p/87438807 t/friends");

    let feedback = run(&mut manager, "edit 1 p/ e/alex@example.com t/");
    assert_eq!(feedback, "Edited Person: Alex Yeoh; Email: alex@example.com");
    let stored = &manager.roster().persons()[0];
    assert!(stored.phone().is_none());
    assert!(stored.tags().is_empty());
}

#[test]
fn sort_orders_names_case_insensitively() {
    let mut manager = manager();
    run(&mut manager, "add n/charlie");
    run(&mut manager, "add n/Alice");
    run(&mut manager, "add n/bob");

    assert_eq!(run(&mut manager, "sort"), MESSAGE_SORTED);
    let names: Vec<&str> = manager
        .roster()
        .persons()
        .iter()
        .map(|stored| stored.name().as_str())
        .collect();
    assert_eq!(names, vec!["Alice", "bob", "charlie"]);
}

#[test]
fn stats_help_and_exit_set_their_flags() {
    let mut manager = manager();
    run(&mut manager, "tag/create t/friends");
    run(&mut manager, "add n/Alex Yeoh t/friends");

    let stats = manager.execute("stats").unwrap();
    assert!(stats.show_stats && !stats.show_help && !stats.exit);
    let report = manager.stats().render();
    assert!(report.contains("Total Students: 1"));
    assert!(report.contains("  1. friends: 1"));

    assert!(manager.execute("help").unwrap().show_help);
    assert!(manager.execute("exit").unwrap().exit);
}

#[test]
fn every_successful_command_saves_a_snapshot() {
    let mut manager = manager();
    run(&mut manager, "group/create g/W09");
    run(&mut manager, "add n/Alex Yeoh g/W09");
    fail(&mut manager, "add n/Alex Yeoh");
    fail(&mut manager, "unknowncommand");

    let storage = manager.storage();
    assert_eq!(storage.saves, 2);
    let saved = storage.saved.as_ref().unwrap();
    assert_eq!(saved.persons.len(), 1);
    assert_eq!(saved.persons[0].groups, vec!["W09".to_string()]);
}

#[test]
fn from_storage_restores_previous_session() {
    let mut first = manager();
    run(&mut first, "tag/create t/friends");
    run(&mut first, "add n/Alex Yeoh t/friends");
    let saved = first.storage().saved.clone();

    let restored = LogicManager::from_storage(MemoryStorage {
        saved,
        ..MemoryStorage::default()
    })
    .unwrap();
    assert_eq!(restored.roster(), first.roster());
}

#[test]
fn permission_denied_save_keeps_change_in_memory() {
    let path = PathBuf::from("/readonly/rollbook.json");
    let mut manager = LogicManager::new(
        Roster::new(),
        ReadOnlyStorage { path: path.clone() },
    );

    let err = manager.execute("add n/Alex Yeoh").unwrap_err();
    assert!(matches!(
        err,
        LogicError::Command(CommandError::Storage(StorageError::PermissionDenied { .. }))
    ));
    assert_eq!(
        err.to_string(),
        format_save_permission_denied(&path.display().to_string())
    );
    assert_eq!(manager.roster().persons().len(), 1);
}
