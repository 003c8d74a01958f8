//! Pure predicates driving the filtered roster projections.

use super::person::Person;
use super::registry::Identity;
use super::tag::Tag;

/// Predicate over persons for the filtered person list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersonFilter {
    #[default]
    All,
    /// Name contains any keyword (case-insensitive substring).
    NameContains(Vec<String>),
    /// Any of the person's group names contains any keyword.
    GroupContains(Vec<String>),
    /// Person holds the tag (case-insensitive).
    HasTag(Tag),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameContains(keywords) => contains_any(person.name().as_str(), keywords),
            Self::GroupContains(keywords) => person
                .groups()
                .iter()
                .any(|group| contains_any(group.name(), keywords)),
            Self::HasTag(tag) => person.has_tag(tag),
        }
    }
}

/// Predicate over groups or tags for their filtered lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelFilter {
    #[default]
    All,
    /// Label contains any keyword (case-insensitive substring).
    NameContains(Vec<String>),
}

impl LabelFilter {
    pub fn matches<T: Identity>(&self, entry: &T) -> bool {
        match self {
            Self::All => true,
            Self::NameContains(keywords) => contains_any(entry.label(), keywords),
        }
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::{LabelFilter, PersonFilter};
    use crate::model::group::Group;
    use crate::model::person::{Name, Person};
    use crate::model::tag::Tag;
    use std::rc::Rc;

    fn person(name: &str, groups: &[&str]) -> Person {
        Person::new(Name::new(name).unwrap()).with_groups(
            groups
                .iter()
                .map(|group| Rc::new(Group::new(*group).unwrap())),
        )
    }

    #[test]
    fn name_filter_matches_substrings_ignoring_case() {
        let filter = PersonFilter::NameContains(vec!["ali".to_string(), "zed".to_string()]);
        assert!(filter.matches(&person("Alice Pauline", &[])));
        assert!(!filter.matches(&person("Benson Meier", &[])));
    }

    #[test]
    fn group_filter_checks_every_group() {
        let filter = PersonFilter::GroupContains(vec!["2103".to_string()]);
        assert!(filter.matches(&person("Alice", &["CS2101", "CS2103T"])));
        assert!(!filter.matches(&person("Bob", &["CS2101"])));
        assert!(!filter.matches(&person("Carl", &[])));
    }

    #[test]
    fn tag_filter_is_case_insensitive() {
        let person = Person::new(Name::new("Dana").unwrap())
            .with_tags(vec![Rc::new(Tag::new("needs_help").unwrap())]);
        assert!(PersonFilter::HasTag(Tag::new("NEEDS_HELP").unwrap()).matches(&person));
    }

    #[test]
    fn label_filter_defaults_to_all() {
        let group = Group::new("CS2103T").unwrap();
        assert!(LabelFilter::default().matches(&group));
        assert!(!LabelFilter::NameContains(vec!["xyz".to_string()]).matches(&group));
    }
}
