//! Argument parsers for person-level commands.

use super::tokenizer::{
    tokenize, ArgumentMultimap, Prefix, PREFIX_ADDRESS, PREFIX_EMAIL, PREFIX_GROUP, PREFIX_NAME,
    PREFIX_NOTE, PREFIX_PHONE, PREFIX_TAG,
};
use super::values::{
    parse_address, parse_email, parse_groups, parse_name, parse_note, parse_phone, parse_tag,
    parse_tags, require_index,
};
use super::{ParseError, ParseResult};
use crate::logic::command::Command;
use crate::logic::messages::{
    USAGE_ADD, USAGE_DELETE, USAGE_EDIT, USAGE_FIND, USAGE_FIND_TAG, USAGE_NOTE_CREATE,
    USAGE_NOTE_DELETE,
};
use crate::logic::person_ops::PersonChanges;
use crate::model::filter::PersonFilter;
use crate::model::person::Person;

const PERSON_PREFIXES: [Prefix; 6] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_TAG,
    PREFIX_GROUP,
];
const SINGLE_VALUED: [Prefix; 4] =
    [PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS];

/// `add n/NAME [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]... [g/GROUP]...`
pub fn parse_add(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &PERSON_PREFIXES);
    if !map.contains(PREFIX_NAME) || !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_ADD });
    }
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED)?;

    let name = parse_name(map.value(PREFIX_NAME).unwrap_or_default(), USAGE_ADD)?;
    let phone = map
        .value(PREFIX_PHONE)
        .map(|raw| parse_phone(raw, USAGE_ADD))
        .transpose()?;
    let email = map
        .value(PREFIX_EMAIL)
        .map(|raw| parse_email(raw, USAGE_ADD))
        .transpose()?;
    let address = map
        .value(PREFIX_ADDRESS)
        .map(|raw| parse_address(raw, USAGE_ADD))
        .transpose()?;
    let tags = parse_tags(map.all_values(PREFIX_TAG), USAGE_ADD)?;
    let groups = parse_groups(map.all_values(PREFIX_GROUP), USAGE_ADD)?;

    let person = Person::new(name)
        .with_phone(phone)
        .with_email(email)
        .with_address(address);
    Ok(Command::Add {
        person,
        tags,
        groups,
    })
}

/// `edit INDEX [n/] [p/] [e/] [a/] [t/]... [g/]...`
///
/// An empty `p/`, `e/` or `a/` clears that field; a lone empty `t/` or
/// `g/` clears the whole set.
pub fn parse_edit(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &PERSON_PREFIXES);
    let index = require_index(map.preamble(), USAGE_EDIT)?;
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED)?;

    let changes = PersonChanges {
        name: map
            .value(PREFIX_NAME)
            .map(|raw| parse_name(raw, USAGE_EDIT))
            .transpose()?,
        phone: clearable(map.value(PREFIX_PHONE), |raw| parse_phone(raw, USAGE_EDIT))?,
        email: clearable(map.value(PREFIX_EMAIL), |raw| parse_email(raw, USAGE_EDIT))?,
        address: clearable(map.value(PREFIX_ADDRESS), |raw| {
            parse_address(raw, USAGE_EDIT)
        })?,
        tags: reference_set(&map, PREFIX_TAG, |raws| parse_tags(raws, USAGE_EDIT))?,
        groups: reference_set(&map, PREFIX_GROUP, |raws| parse_groups(raws, USAGE_EDIT))?,
    };
    if !changes.is_any_field_edited() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(Command::Edit { index, changes })
}

/// `delete INDEX`
pub fn parse_delete(args: &str) -> ParseResult<Command> {
    let index = require_index(args, USAGE_DELETE)?;
    Ok(Command::Delete { index })
}

/// `find n/KEYWORDS...` or `find g/KEYWORDS...`, never both.
pub fn parse_find(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_GROUP]);
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_FIND });
    }
    let by_name = map.count(PREFIX_NAME);
    let by_group = map.count(PREFIX_GROUP);
    if by_name + by_group > 1 {
        return Err(ParseError::SingleParameterOnly);
    }

    let prefix = match (by_name, by_group) {
        (1, 0) => PREFIX_NAME,
        (0, 1) => PREFIX_GROUP,
        _ => return Err(ParseError::InvalidFormat { usage: USAGE_FIND }),
    };
    let keywords: Vec<String> = map
        .value(prefix)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_FIND });
    }
    let filter = if prefix == PREFIX_NAME {
        PersonFilter::NameContains(keywords)
    } else {
        PersonFilter::GroupContains(keywords)
    };
    Ok(Command::Find { filter })
}

/// `findtag t/TAG`
pub fn parse_find_tag(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_TAG]);
    if !map.contains(PREFIX_TAG) || !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: USAGE_FIND_TAG,
        });
    }
    map.verify_no_duplicate_prefixes(&[PREFIX_TAG])?;
    let tag = parse_tag(map.value(PREFIX_TAG).unwrap_or_default(), USAGE_FIND_TAG)?;
    Ok(Command::FindTag { tag })
}

/// `note/create INDEX r/NOTE`
pub fn parse_note_create(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NOTE]);
    let index = require_index(map.preamble(), USAGE_NOTE_CREATE)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NOTE])?;
    let note = parse_note(
        map.value(PREFIX_NOTE).unwrap_or_default(),
        USAGE_NOTE_CREATE,
    )?;
    if note.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: USAGE_NOTE_CREATE,
        });
    }
    Ok(Command::NoteCreate { index, note })
}

/// `note/delete INDEX`
pub fn parse_note_delete(args: &str) -> ParseResult<Command> {
    let index = require_index(args, USAGE_NOTE_DELETE)?;
    Ok(Command::NoteDelete { index })
}

fn clearable<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> ParseResult<T>,
) -> ParseResult<Option<Option<T>>> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(Some(None)),
        Some(value) => parse(value).map(|parsed| Some(Some(parsed))),
    }
}

fn reference_set<T>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: impl FnOnce(&[String]) -> ParseResult<Vec<T>>,
) -> ParseResult<Option<Vec<T>>> {
    let raws = map.all_values(prefix);
    match raws {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(Vec::new())),
        _ => parse(raws).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_add, parse_edit, parse_find, parse_note_create};
    use crate::logic::command::Command;
    use crate::model::filter::PersonFilter;
    use crate::parser::ParseError;

    #[test]
    fn add_keeps_reference_names_in_input_order() {
        let command = parse_add(" n/Amy Bee p/85355255 t/zeta t/alpha g/CS2103T").unwrap();
        let Command::Add {
            person,
            tags,
            groups,
        } = command
        else {
            panic!("expected add command");
        };
        assert_eq!(person.name().as_str(), "Amy Bee");
        assert_eq!(person.phone().map(|phone| phone.as_str()), Some("85355255"));
        let tag_names: Vec<&str> = tags.iter().map(|tag| tag.name()).collect();
        assert_eq!(tag_names, vec!["zeta", "alpha"]);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn add_requires_name_and_rejects_preamble() {
        assert!(matches!(
            parse_add(" p/123"),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_add(" junk n/Amy"),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_add(" n/Amy n/Bob"),
            Err(ParseError::DuplicatePrefixes(_))
        ));
    }

    #[test]
    fn edit_distinguishes_clear_from_untouched() {
        let Command::Edit { index, changes } = parse_edit(" 2 p/ t/").unwrap() else {
            panic!("expected edit command");
        };
        assert_eq!(index.one_based(), 2);
        assert_eq!(changes.phone, Some(None));
        assert_eq!(changes.email, None);
        assert_eq!(changes.tags, Some(Vec::new()));
        assert_eq!(changes.groups, None);
    }

    #[test]
    fn edit_without_fields_is_rejected() {
        assert_eq!(parse_edit(" 1"), Err(ParseError::NothingToEdit));
    }

    #[test]
    fn find_accepts_exactly_one_mode() {
        assert_eq!(
            parse_find(" n/alice bob"),
            Ok(Command::Find {
                filter: PersonFilter::NameContains(vec!["alice".into(), "bob".into()])
            })
        );
        assert_eq!(
            parse_find(" n/Alice g/CS2103T"),
            Err(ParseError::SingleParameterOnly)
        );
        assert_eq!(
            parse_find(" g/CS2103T g/CS2101"),
            Err(ParseError::SingleParameterOnly)
        );
        assert!(matches!(
            parse_find(""),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_find(" n/  "),
            Err(ParseError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn note_create_rejects_empty_note() {
        assert!(matches!(
            parse_note_create(" 1 r/"),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_note_create(" 1 r/Needs help"),
            Ok(Command::NoteCreate { .. })
        ));
    }
}
