//! Roster aggregate: persons, groups and tags plus their filtered views.
//!
//! # Responsibility
//! - Compose the three registries behind one mutation surface.
//! - Canonicalize person references on every add/edit.
//! - Cascade group/tag deletion into every affected person.
//! - Keep the filtered projections current after each mutation.
//!
//! # Invariants
//! - Every group/tag held by a stored person is the registry's `Rc`.
//! - Projections are recomputed eagerly; they are never authoritative.
//! - A failed operation leaves registries and projections untouched.

use super::filter::{LabelFilter, PersonFilter};
use super::group::Group;
use super::index::Index;
use super::person::Person;
use super::registry::{Identity, Registry, RegistryError, RegistryResult};
use super::tag::Tag;
use std::rc::Rc;

/// Aggregate root for one session's data.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    persons: Registry<Person>,
    groups: Registry<Group>,
    tags: Registry<Tag>,
    person_filter: PersonFilter,
    group_filter: LabelFilter,
    tag_filter: LabelFilter,
    filtered_persons: Vec<Rc<Person>>,
    filtered_groups: Vec<Rc<Group>>,
    filtered_tags: Vec<Rc<Tag>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    /// Inserts a person and resets the person view to show everyone.
    ///
    /// Groups and tags the person references but the roster does not know
    /// yet are registered on the fly.
    ///
    /// # Errors
    /// - `Duplicate` when a person with the same name exists.
    pub fn add_person(&mut self, person: Person) -> RegistryResult<Rc<Person>> {
        if self.persons.contains(&person) {
            return Err(RegistryError::Duplicate {
                kind: Person::KIND,
                name: person.label().to_string(),
            });
        }
        let canonical = self.canonicalize(person);
        let added = self.persons.add(canonical)?;
        self.person_filter = PersonFilter::All;
        self.refresh();
        Ok(added)
    }

    /// Replaces `target` with `edited` in place.
    ///
    /// # Errors
    /// - `NotFound` when `target` is not stored.
    /// - `Duplicate` when `edited` renames onto another stored person.
    pub fn set_person(&mut self, target: &Person, edited: Person) -> RegistryResult<Rc<Person>> {
        if !self.persons.contains(target) {
            return Err(RegistryError::NotFound {
                kind: Person::KIND,
                name: target.label().to_string(),
            });
        }
        if !target.is_same_person(&edited) && self.persons.contains(&edited) {
            return Err(RegistryError::Duplicate {
                kind: Person::KIND,
                name: edited.label().to_string(),
            });
        }
        let canonical = self.canonicalize(edited);
        let replaced = self.persons.replace(target, Rc::new(canonical))?;
        self.refresh();
        Ok(replaced)
    }

    pub fn remove_person(&mut self, person: &Person) -> RegistryResult<Rc<Person>> {
        let removed = self.persons.remove(person)?;
        self.refresh();
        Ok(removed)
    }

    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.contains(group)
    }

    pub fn add_group(&mut self, group: Group) -> RegistryResult<Rc<Group>> {
        let added = self.groups.add(group)?;
        self.refresh();
        Ok(added)
    }

    pub fn get_group(&self, group: &Group) -> RegistryResult<Rc<Group>> {
        self.groups.get(group)
    }

    /// Deletes a group and detaches it from every person holding it.
    ///
    /// Returns the removed canonical group and the number of persons that
    /// were updated.
    pub fn delete_group(&mut self, group: &Group) -> RegistryResult<(Rc<Group>, usize)> {
        let canonical = self.groups.get(group)?;
        let holders: Vec<Rc<Person>> = self
            .persons
            .iter()
            .filter(|person| person.has_group(&canonical))
            .cloned()
            .collect();
        for holder in &holders {
            self.persons
                .replace(holder, Rc::new(holder.without_group(&canonical)))?;
        }
        let removed = self.groups.remove(&canonical)?;
        self.refresh();
        Ok((removed, holders.len()))
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: Tag) -> RegistryResult<Rc<Tag>> {
        let added = self.tags.add(tag)?;
        self.refresh();
        Ok(added)
    }

    pub fn get_tag(&self, tag: &Tag) -> RegistryResult<Rc<Tag>> {
        self.tags.get(tag)
    }

    /// Deletes a tag and detaches it from every person holding it.
    pub fn delete_tag(&mut self, tag: &Tag) -> RegistryResult<(Rc<Tag>, usize)> {
        let canonical = self.tags.get(tag)?;
        let holders: Vec<Rc<Person>> = self
            .persons
            .iter()
            .filter(|person| person.has_tag(&canonical))
            .cloned()
            .collect();
        for holder in &holders {
            self.persons
                .replace(holder, Rc::new(holder.without_tag(&canonical)))?;
        }
        let removed = self.tags.remove(&canonical)?;
        self.refresh();
        Ok((removed, holders.len()))
    }

    /// Stable sort of all persons by case-folded name.
    pub fn sort_persons(&mut self) {
        self.persons.sort_by_key(|person| person.identity_key());
        self.refresh();
    }

    /// Drops every person, group and tag. Filters go back to "show all".
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn update_person_filter(&mut self, filter: PersonFilter) {
        self.person_filter = filter;
        self.refresh();
    }

    pub fn update_group_filter(&mut self, filter: LabelFilter) {
        self.group_filter = filter;
        self.refresh();
    }

    pub fn update_tag_filter(&mut self, filter: LabelFilter) {
        self.tag_filter = filter;
        self.refresh();
    }

    pub fn person_filter(&self) -> &PersonFilter {
        &self.person_filter
    }

    pub fn persons(&self) -> &[Rc<Person>] {
        self.persons.as_slice()
    }

    pub fn groups(&self) -> &[Rc<Group>] {
        self.groups.as_slice()
    }

    pub fn tags(&self) -> &[Rc<Tag>] {
        self.tags.as_slice()
    }

    pub fn filtered_persons(&self) -> &[Rc<Person>] {
        &self.filtered_persons
    }

    pub fn filtered_groups(&self) -> &[Rc<Group>] {
        &self.filtered_groups
    }

    pub fn filtered_tags(&self) -> &[Rc<Tag>] {
        &self.filtered_tags
    }

    /// Resolves a displayed position against the filtered person list.
    pub fn filtered_person_at(&self, index: Index) -> Option<Rc<Person>> {
        self.filtered_persons.get(index.zero_based()).cloned()
    }

    fn canonicalize(&mut self, person: Person) -> Person {
        let groups: Vec<Rc<Group>> = person
            .groups()
            .iter()
            .map(|group| resolve_or_register(&mut self.groups, group))
            .collect();
        let tags: Vec<Rc<Tag>> = person
            .tags()
            .iter()
            .map(|tag| resolve_or_register(&mut self.tags, tag))
            .collect();
        person.with_groups(groups).with_tags(tags)
    }

    fn refresh(&mut self) {
        self.filtered_persons = self
            .persons
            .iter()
            .filter(|person| self.person_filter.matches(person.as_ref()))
            .cloned()
            .collect();
        self.filtered_groups = self
            .groups
            .iter()
            .filter(|group| self.group_filter.matches(group.as_ref()))
            .cloned()
            .collect();
        self.filtered_tags = self
            .tags
            .iter()
            .filter(|tag| self.tag_filter.matches(tag.as_ref()))
            .cloned()
            .collect();
    }
}

impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.persons == other.persons && self.groups == other.groups && self.tags == other.tags
    }
}

fn resolve_or_register<T: Identity>(registry: &mut Registry<T>, value: &Rc<T>) -> Rc<T> {
    if let Some(canonical) = registry.find(value) {
        return Rc::clone(canonical);
    }
    registry
        .add_shared(Rc::clone(value))
        .unwrap_or_else(|_| Rc::clone(value))
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use crate::model::filter::PersonFilter;
    use crate::model::group::Group;
    use crate::model::person::{Name, Person};
    use crate::model::registry::RegistryError;
    use crate::model::tag::Tag;
    use std::rc::Rc;

    fn person(name: &str) -> Person {
        Person::new(Name::new(name).unwrap())
    }

    fn group(name: &str) -> Rc<Group> {
        Rc::new(Group::new(name).unwrap())
    }

    #[test]
    fn add_person_rejects_same_name_ignoring_case() {
        let mut roster = Roster::new();
        roster.add_person(person("Alice Pauline")).unwrap();
        let err = roster.add_person(person("alice pauline")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
        assert_eq!(roster.persons().len(), 1);
    }

    #[test]
    fn add_person_registers_unknown_groups_and_reuses_known_ones() {
        let mut roster = Roster::new();
        let canonical = roster.add_group(Group::new("CS2103T").unwrap()).unwrap();

        let stored = roster
            .add_person(person("Alice").with_groups(vec![group("cs2103t"), group("CS2101")]))
            .unwrap();

        assert_eq!(roster.groups().len(), 2);
        let held = stored
            .groups()
            .iter()
            .find(|held| held.name().eq_ignore_ascii_case("cs2103t"))
            .unwrap();
        assert!(Rc::ptr_eq(held, &canonical));
        assert_eq!(held.name(), "CS2103T");
    }

    #[test]
    fn set_person_rejects_rename_onto_other_person() {
        let mut roster = Roster::new();
        let alice = roster.add_person(person("Alice")).unwrap();
        roster.add_person(person("Bob")).unwrap();

        let err = roster.set_person(&alice, person("BOB")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));

        roster.set_person(&alice, person("ALICE")).unwrap();
        assert_eq!(roster.persons()[0].name().as_str(), "ALICE");
    }

    #[test]
    fn delete_group_cascades_and_counts_holders() {
        let mut roster = Roster::new();
        roster
            .add_person(person("Alice").with_groups(vec![group("G1"), group("G2")]))
            .unwrap();
        roster
            .add_person(person("Bob").with_groups(vec![group("g1")]))
            .unwrap();
        roster.add_person(person("Carl")).unwrap();

        let (removed, affected) = roster.delete_group(&Group::new("G1").unwrap()).unwrap();

        assert_eq!(removed.name(), "G1");
        assert_eq!(affected, 2);
        assert!(!roster.has_group(&removed));
        assert!(roster
            .persons()
            .iter()
            .all(|person| !person.has_group(&removed)));
        assert_eq!(roster.persons()[0].groups().len(), 1);
    }

    #[test]
    fn delete_missing_tag_fails_without_changes() {
        let mut roster = Roster::new();
        roster.add_person(person("Alice")).unwrap();
        let err = roster.delete_tag(&Tag::new("ghost").unwrap()).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
        assert_eq!(roster.persons().len(), 1);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let mut roster = Roster::new();
        for name in ["charlie", "Alice", "bob"] {
            roster.add_person(person(name)).unwrap();
        }
        roster.sort_persons();
        let once: Vec<String> = roster
            .persons()
            .iter()
            .map(|person| person.name().to_string())
            .collect();
        roster.sort_persons();
        let twice: Vec<String> = roster
            .persons()
            .iter()
            .map(|person| person.name().to_string())
            .collect();
        assert_eq!(once, vec!["Alice", "bob", "charlie"]);
        assert_eq!(once, twice);

        let mut empty = Roster::new();
        empty.sort_persons();
        assert!(empty.persons().is_empty());
    }

    #[test]
    fn projections_follow_filter_and_mutations() {
        let mut roster = Roster::new();
        roster.add_person(person("Alice")).unwrap();
        roster.add_person(person("Bob")).unwrap();

        roster.update_person_filter(PersonFilter::NameContains(vec!["ali".to_string()]));
        assert_eq!(roster.filtered_persons().len(), 1);

        let alice = roster.filtered_persons()[0].clone();
        roster.remove_person(&alice).unwrap();
        assert!(roster.filtered_persons().is_empty());
        assert_eq!(roster.persons().len(), 1);
    }
}
