//! Prefix tokenizer for command arguments.
//!
//! # Responsibility
//! - Split argument text into an unprefixed preamble plus prefix -> values.
//!
//! # Invariants
//! - A prefix only counts when preceded by whitespace (or at the start).
//! - Values are trimmed; repeated prefixes keep every value in input order.

use super::ParseError;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Two-character argument marker such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(token: &'static str) -> Self {
        Self(token)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_GROUP: Prefix = Prefix::new("g/");
pub const PREFIX_NOTE: Prefix = Prefix::new("r/");

/// Tokenized arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first recognized prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    pub fn count(&self, prefix: Prefix) -> usize {
        self.all_values(prefix).len()
    }

    /// Fails when any of `prefixes` was given more than once.
    pub fn verify_no_duplicate_prefixes(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let duplicated: Vec<Prefix> = prefixes
            .iter()
            .copied()
            .filter(|prefix| self.count(*prefix) > 1)
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated))
        }
    }
}

/// Splits `args` on the given prefixes.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let text = format!(" {args}");
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        let needle = format!(" {prefix}");
        let mut from = 0;
        while let Some(found) = text[from..].find(&needle) {
            let start = from + found;
            positions.push((start, *prefix));
            from = start + 1;
        }
    }
    positions.sort_by_key(|(start, _)| *start);

    let mut multimap = ArgumentMultimap::default();
    let preamble_end = positions.first().map_or(text.len(), |(start, _)| *start);
    multimap.preamble = text[..preamble_end].trim().to_string();

    for (slot, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + 1 + prefix.as_str().len();
        let value_end = positions
            .get(slot + 1)
            .map_or(text.len(), |(next, _)| *next);
        let value = text[value_start..value_end].trim().to_string();
        multimap.values.entry(*prefix).or_default().push(value);
    }
    multimap
}

#[cfg(test)]
mod tests {
    use super::{tokenize, PREFIX_GROUP, PREFIX_NAME, PREFIX_TAG};
    use crate::parser::ParseError;

    #[test]
    fn splits_preamble_and_repeated_values() {
        let map = tokenize(" 1 2 n/Amy Bee t/friends t/ owes g/CS2103T", &[
            PREFIX_NAME,
            PREFIX_TAG,
            PREFIX_GROUP,
        ]);
        assert_eq!(map.preamble(), "1 2");
        assert_eq!(map.value(PREFIX_NAME), Some("Amy Bee"));
        assert_eq!(map.all_values(PREFIX_TAG), ["friends", "owes"]);
        assert_eq!(map.value(PREFIX_GROUP), Some("CS2103T"));
    }

    #[test]
    fn prefix_inside_a_word_is_not_a_prefix() {
        let map = tokenize("n/A/n/B", &[PREFIX_NAME]);
        assert_eq!(map.all_values(PREFIX_NAME), ["A/n/B"]);
    }

    #[test]
    fn empty_value_is_kept() {
        let map = tokenize(" 1 t/", &[PREFIX_TAG]);
        assert!(map.contains(PREFIX_TAG));
        assert_eq!(map.value(PREFIX_TAG), Some(""));
    }

    #[test]
    fn duplicate_single_valued_prefix_is_reported() {
        let map = tokenize(" n/A n/B", &[PREFIX_NAME]);
        let err = map.verify_no_duplicate_prefixes(&[PREFIX_NAME]).unwrap_err();
        assert_eq!(err, ParseError::DuplicatePrefixes(vec![PREFIX_NAME]));
    }
}
