use rollbook_core::model::person::{Name, Person};
use rollbook_core::model::registry::RegistryError;
use rollbook_core::{Group, Roster, Tag};
use std::rc::Rc;

fn person(name: &str) -> Person {
    Person::new(Name::new(name).unwrap())
}

fn group(name: &str) -> Rc<Group> {
    Rc::new(Group::new(name).unwrap())
}

fn tag(name: &str) -> Rc<Tag> {
    Rc::new(Tag::new(name).unwrap())
}

#[test]
fn second_person_with_same_name_is_rejected() {
    let mut roster = Roster::new();
    roster.add_person(person("Bernice Yu")).unwrap();

    let err = roster.add_person(person("BERNICE YU")).unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));
    assert_eq!(roster.persons().len(), 1);
    assert_eq!(roster.persons()[0].name().as_str(), "Bernice Yu");
}

#[test]
fn delete_group_strips_every_holder_and_reports_count() {
    let mut roster = Roster::new();
    roster.add_group(Group::new("CS2103T").unwrap()).unwrap();
    roster.add_group(Group::new("CS2101").unwrap()).unwrap();
    roster
        .add_person(person("Alex Yeoh").with_groups([group("cs2103t"), group("CS2101")]))
        .unwrap();
    roster
        .add_person(person("Charlotte Oliveiro").with_groups([group("CS2103T")]))
        .unwrap();
    roster.add_person(person("David Li")).unwrap();

    let (removed, affected) = roster.delete_group(&Group::new("cs2103T").unwrap()).unwrap();
    assert_eq!(removed.name(), "CS2103T");
    assert_eq!(affected, 2);
    assert_eq!(roster.groups().len(), 1);
    for stored in roster.persons() {
        assert!(!stored.has_group(&removed));
    }
    assert_eq!(roster.persons()[0].groups().len(), 1);
    assert_eq!(roster.filtered_groups().len(), 1);
}

#[test]
fn delete_unused_tag_reports_zero() {
    let mut roster = Roster::new();
    roster.add_tag(Tag::new("quiet").unwrap()).unwrap();
    roster.add_person(person("Irfan Ibrahim")).unwrap();

    let (_, affected) = roster.delete_tag(&Tag::new("QUIET").unwrap()).unwrap();
    assert_eq!(affected, 0);
    assert!(roster.tags().is_empty());
    assert!(matches!(
        roster.delete_tag(&Tag::new("quiet").unwrap()),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn roster_mutations_share_canonical_references() {
    let mut roster = Roster::new();
    let canonical = roster.add_tag(Tag::new("Friends").unwrap()).unwrap();

    roster
        .add_person(person("Roy Balakrishnan").with_tags([tag("friends")]))
        .unwrap();
    roster
        .add_person(person("Irfan Ibrahim").with_groups([group("W09")]))
        .unwrap();

    assert!(Rc::ptr_eq(&roster.persons()[0].tags()[0], &canonical));
    assert_eq!(roster.groups().len(), 1);
    assert!(Rc::ptr_eq(&roster.persons()[1].groups()[0], &roster.groups()[0]));
}

#[test]
fn sorting_is_idempotent() {
    let mut roster = Roster::new();
    for name in ["charlie", "Alice", "bob", "alicia"] {
        roster.add_person(person(name)).unwrap();
    }

    roster.sort_persons();
    let once: Vec<String> = roster
        .persons()
        .iter()
        .map(|stored| stored.name().as_str().to_string())
        .collect();
    roster.sort_persons();
    let twice: Vec<String> = roster
        .persons()
        .iter()
        .map(|stored| stored.name().as_str().to_string())
        .collect();

    assert_eq!(once, vec!["Alice", "alicia", "bob", "charlie"]);
    assert_eq!(once, twice);
}

#[test]
fn set_person_rejects_rename_onto_existing_name() {
    let mut roster = Roster::new();
    roster.add_person(person("Alex Yeoh")).unwrap();
    let target = roster.add_person(person("David Li")).unwrap();

    let err = roster
        .set_person(&target, person("alex yeoh"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));
    assert_eq!(roster.persons()[1].name().as_str(), "David Li");
}
