use std::slice;
use std::vec;

use crate::keywords::{EntryType, FieldType};

/// One `key = value` pair inside an entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    /// field type, e.g. “author”
    pub kind: FieldType,
    /// raw field value as written between the quotes, or the digits of a number
    pub value: String,
}

impl Field {
    pub fn new(kind: FieldType, value: String) -> Field {
        Field { kind, value }
    }
}

/// One entry in a `.bib` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    /// entry type, e.g. “article”
    pub kind: EntryType,
    /// citation key, e.g. “Knuth97”. Not checked for uniqueness.
    pub key: String,
    /// fields in source order, duplicates included
    pub fields: Vec<Field>,
}

impl Entry {
    pub fn new(kind: EntryType, key: String) -> Entry {
        Entry {
            kind,
            key,
            fields: Vec::new(),
        }
    }

    /// Value of the first field of type `kind`
    pub fn get(&self, kind: FieldType) -> Option<&str> {
        self.get_all(kind).next()
    }

    /// Values of all fields of type `kind` in source order
    pub fn get_all(&self, kind: FieldType) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(move |field| field.kind == kind)
            .map(|field| field.value.as_str())
    }

    /// Drop all fields of this entry
    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }
}

/// The result of parsing a bib source: its entries in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    pub(crate) entries: Vec<Entry>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// First entry with exactly this citation key
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Drop all entries together with their fields
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

impl IntoIterator for Document {
    type Item = Entry;
    type IntoIter = vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'d> IntoIterator for &'d Document {
    type Item = &'d Entry;
    type IntoIter = slice::Iter<'d, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
