//! Roster statistics report.
//!
//! # Invariants
//! - Tag counts are case-insensitive and listed alphabetically.
//! - Group sections follow registry order.

use super::person::Person;
use super::roster::Roster;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Per-group breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStats {
    pub name: String,
    pub students: usize,
    /// Lowercased tag name to holder count inside the group.
    pub tag_counts: BTreeMap<String, usize>,
}

/// Snapshot of roster-wide counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub total_students: usize,
    pub tag_counts: BTreeMap<String, usize>,
    pub groups: Vec<GroupStats>,
}

impl RosterStats {
    /// Computes counts over every stored person, ignoring active filters.
    pub fn compute(roster: &Roster) -> Self {
        let persons = roster.persons();
        let tag_counts = count_tags(persons.iter().map(|person| person.as_ref()));
        let groups = roster
            .groups()
            .iter()
            .map(|group| {
                let members: Vec<_> = persons
                    .iter()
                    .filter(|person| person.has_group(group))
                    .collect();
                GroupStats {
                    name: group.name().to_string(),
                    students: members.len(),
                    tag_counts: count_tags(members.iter().map(|person| person.as_ref())),
                }
            })
            .collect();

        Self {
            total_students: persons.len(),
            tag_counts,
            groups,
        }
    }

    /// Renders the plain-text report shown by the `stats` command.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== TOTAL STATS ===");
        let _ = writeln!(out, "Total Students: {}", self.total_students);
        let _ = writeln!(out, "Total Unique Tags in use: {}", self.tag_counts.len());
        let _ = writeln!(out, "Tags in use:");
        write_tag_lines(&mut out, &self.tag_counts, "  ");

        let _ = writeln!(out, "\n=== GROUP STATS ===");
        if self.groups.is_empty() {
            let _ = writeln!(out, "(No groups found)");
        }
        for group in &self.groups {
            let _ = writeln!(out, "\nGroup: {}", group.name);
            let _ = writeln!(out, "  Students: {}", group.students);
            let _ = writeln!(out, "  Unique Tags: {}", group.tag_counts.len());
            let _ = writeln!(out, "  Tags:");
            write_tag_lines(&mut out, &group.tag_counts, "    ");
        }
        out
    }
}

fn count_tags<'a>(persons: impl Iterator<Item = &'a Person>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for person in persons {
        for tag in person.tags() {
            *counts.entry(tag.name().to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

fn write_tag_lines(out: &mut String, counts: &BTreeMap<String, usize>, indent: &str) {
    if counts.is_empty() {
        let _ = writeln!(out, "{indent}(No tags found)");
        return;
    }
    for (position, (name, count)) in counts.iter().enumerate() {
        let _ = writeln!(out, "{indent}{}. {name}: {count}", position + 1);
    }
}
