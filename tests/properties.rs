//! Property-based tests for the bib parser.

use bibtex::{parse, EntryType, ErrorKind, FieldType, Position};
use proptest::prelude::*;

fn random_case(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(chr, up)| if up { chr.to_ascii_uppercase() } else { chr })
            .collect()
    })
}

/// An entry type together with its keyword in random case
fn entry_type() -> impl Strategy<Value = (EntryType, String)> {
    proptest::sample::select(EntryType::all().collect::<Vec<_>>())
        .prop_flat_map(|kind| (Just(kind), random_case(kind.name())))
}

fn field_type() -> impl Strategy<Value = (FieldType, String)> {
    proptest::sample::select(FieldType::all().collect::<Vec<_>>())
        .prop_flat_map(|kind| (Just(kind), random_case(kind.name())))
}

/// Raw value and its source text
fn value() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[^\"]{0,20}".prop_map(|raw| (raw.clone(), format!("\"{}\"", raw))),
        "[0-9]{1,6}".prop_map(|digits| (digits.clone(), digits)),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,10}"
}

fn whitespace() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,3}"
}

proptest! {
    #[test]
    fn single_entry_is_reproduced(
        (kind, kind_word) in entry_type(),
        key in key(),
        fields in proptest::collection::vec((field_type(), value()), 0..6),
        ws in whitespace(),
        trailing_comma in any::<bool>(),
    ) {
        let mut src = format!("{ws}@{ws}{kind_word}{ws}{{{ws}{key}{ws}");
        for ((_, name), (_, text)) in fields.iter() {
            src.push_str(&format!(",{ws}{name}{ws}={ws}{text}{ws}"));
        }
        if trailing_comma {
            src.push(',');
        }
        src.push_str(&format!("}}{ws}"));

        let doc = parse(&src).map_err(|err| TestCaseError::fail(format!("{src:?}: {err}")))?;
        prop_assert_eq!(doc.len(), 1);
        let entry = &doc.entries()[0];
        prop_assert_eq!(entry.kind, kind);
        prop_assert_eq!(&entry.key, &key);
        prop_assert_eq!(entry.fields.len(), fields.len());
        for (field, ((field_kind, _), (raw, _))) in entry.fields.iter().zip(fields.iter()) {
            prop_assert_eq!(field.kind, *field_kind);
            prop_assert_eq!(&field.value, raw);
        }
    }

    #[test]
    fn whitespace_only_is_empty(src in "[ \t\r\n\x0B\x0C]{0,30}") {
        let doc = parse(&src).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert!(doc.is_empty());
    }

    #[test]
    fn parsing_is_deterministic(src in "[@{}=,\"a-zA-Z0-9 \n:#]{0,40}") {
        prop_assert_eq!(parse(&src), parse(&src));
    }

    #[test]
    fn arbitrary_text_never_panics(src in "\\PC{0,60}") {
        let _ = parse(&src);
    }

    #[test]
    fn unterminated_string_points_at_quote(
        (_, name) in field_type(),
        spaces in "[ ]{0,4}",
        rest in "[^\"]{0,20}",
    ) {
        let prefix = format!("@misc{{k,{name}{spaces}={spaces}");
        let src = format!("{prefix}\"{rest}");
        let err = parse(&src).err().ok_or_else(|| TestCaseError::fail("parsed"))?;
        prop_assert_eq!(err.kind, ErrorKind::UnterminatedString);
        prop_assert_eq!(err.position, Position::new(1, prefix.chars().count() + 1));
    }

    #[test]
    fn identifier_after_entry_needs_at(key in key(), word in "[a-zA-Z]{1,8}") {
        let src = format!("@misc{{{key}}} {word}");
        let err = parse(&src).err().ok_or_else(|| TestCaseError::fail("parsed"))?;
        prop_assert_eq!(err.kind, ErrorKind::EXPECT_AT);
        prop_assert_eq!(err.column(), key.len() + 9);
    }
}
