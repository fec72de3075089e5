use std::fmt;
use std::str;

use crate::errors;

/// The kind of a bibliography entry, written after `@` in the source,
/// e.g. `@article{...}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum EntryType {
    Article,
    Book,
    Booklet,
    Conference,
    InBook,
    InCollection,
    InProceedings,
    Manual,
    MastersThesis,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
}

/// The kind of a field inside an entry, e.g. `author` in `author = "..."`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum FieldType {
    Address,
    Annote,
    Author,
    BookTitle,
    Chapter,
    Doi,
    Edition,
    Editor,
    HowPublished,
    Institution,
    Issn,
    Isbn,
    Journal,
    Month,
    Note,
    Number,
    Organization,
    Pages,
    Publisher,
    School,
    Type,
    Series,
    Title,
    Url,
    Volume,
    Year,
}

/// Keywords of all entry types, in declaration order.
pub(crate) const ENTRY_TYPES: &[(&str, EntryType)] = &[
    ("article", EntryType::Article),
    ("book", EntryType::Book),
    ("booklet", EntryType::Booklet),
    ("conference", EntryType::Conference),
    ("inbook", EntryType::InBook),
    ("incollection", EntryType::InCollection),
    ("inproceedings", EntryType::InProceedings),
    ("manual", EntryType::Manual),
    ("mastersthesis", EntryType::MastersThesis),
    ("misc", EntryType::Misc),
    ("phdthesis", EntryType::PhdThesis),
    ("proceedings", EntryType::Proceedings),
    ("techreport", EntryType::TechReport),
    ("unpublished", EntryType::Unpublished),
];

/// Keywords of all field types, in declaration order.
pub(crate) const FIELD_TYPES: &[(&str, FieldType)] = &[
    ("address", FieldType::Address),
    ("annote", FieldType::Annote),
    ("author", FieldType::Author),
    ("booktitle", FieldType::BookTitle),
    ("chapter", FieldType::Chapter),
    ("doi", FieldType::Doi),
    ("edition", FieldType::Edition),
    ("editor", FieldType::Editor),
    ("howpublished", FieldType::HowPublished),
    ("institution", FieldType::Institution),
    ("issn", FieldType::Issn),
    ("isbn", FieldType::Isbn),
    ("journal", FieldType::Journal),
    ("month", FieldType::Month),
    ("note", FieldType::Note),
    ("number", FieldType::Number),
    ("organization", FieldType::Organization),
    ("pages", FieldType::Pages),
    ("publisher", FieldType::Publisher),
    ("school", FieldType::School),
    ("type", FieldType::Type),
    ("series", FieldType::Series),
    ("title", FieldType::Title),
    ("url", FieldType::Url),
    ("volume", FieldType::Volume),
    ("year", FieldType::Year),
];

/// Linear scan over `table`, comparing ASCII case-insensitively.
/// Keywords of a different length never match.
fn lookup<T: Copy>(table: &[(&'static str, T)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(keyword, _)| keyword.len() == text.len() && keyword.eq_ignore_ascii_case(text))
        .map(|&(_, value)| value)
}

fn name_of<T: PartialEq>(table: &[(&'static str, T)], value: &T, unknown: &'static str) -> &'static str {
    table
        .iter()
        .find(|(_, v)| v == value)
        .map_or(unknown, |&(keyword, _)| keyword)
}

impl EntryType {
    /// Resolve an entry type keyword like “Article” or “BOOK”.
    /// Returns `None` if `text` is no known entry type.
    pub fn lookup(text: &str) -> Option<EntryType> {
        lookup(ENTRY_TYPES, text)
    }

    /// The lowercase keyword of this entry type, e.g. “inproceedings”
    pub fn name(&self) -> &'static str {
        name_of(ENTRY_TYPES, self, "Unknown entry")
    }

    /// All entry types in declaration order
    pub fn all() -> impl Iterator<Item = EntryType> {
        ENTRY_TYPES.iter().map(|&(_, kind)| kind)
    }
}

impl FieldType {
    /// Resolve a field type keyword like “Author” or “YEAR”.
    /// Returns `None` if `text` is no known field type.
    pub fn lookup(text: &str) -> Option<FieldType> {
        lookup(FIELD_TYPES, text)
    }

    /// The lowercase keyword of this field type, e.g. “booktitle”
    pub fn name(&self) -> &'static str {
        name_of(FIELD_TYPES, self, "Unknown field")
    }

    /// All field types in declaration order
    pub fn all() -> impl Iterator<Item = FieldType> {
        FIELD_TYPES.iter().map(|&(_, kind)| kind)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for EntryType {
    type Err = errors::UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| errors::UnknownKeyword(s.to_string()))
    }
}

impl str::FromStr for FieldType {
    type Err = errors::UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| errors::UnknownKeyword(s.to_string()))
    }
}
