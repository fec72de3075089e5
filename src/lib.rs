//! This crate reads BibTeχ bibliographies into typed, in-memory entries.
//!
//! An entry in a `.bib` file can look like this:
//!
//! ```tex
//! @book{Knuth73,
//!     author    = "Donald E. Knuth",
//!     title     = "The Art of Computer Programming, Volume I",
//!     publisher = "Addison-Wesley",
//!     year      = 1973,
//!     isbn      = "0201038218"
//! }
//! ```
//!
//! Here we call `book` the entry's `kind` and `Knuth73` its `key`.
//! Then we have a sequence of fields, each with a `kind` (like `year`)
//! and a raw `value` (like `1973`). Entry and field kinds are drawn from
//! the fixed sets of classic BibTeχ and matched case-insensitively, so
//! `@BOOK` and `@book` are the same.
//!
//! The accepted grammar is deliberately small:
//!
//! ```text
//! document := (entry)*
//! entry    := '@' ENTRY_TYPE '{' KEY (',' field)* '}'
//! field    := FIELD_TYPE '=' (STRING | NUMBER)
//! ```
//!
//! Strings are enclosed in double quotes and taken verbatim; numbers are
//! bare digits. Neither `@string` macros nor `{…}` delimited values are
//! supported. Parsing stops at the first error, which carries a kind and
//! a 1-based line and column:
//!
//! ```rust
//! use bibtex::{EntryType, ErrorKind, FieldType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = bibtex::parse(r#"@book{tolkien1937, author = "J. R. R. Tolkien", year = 1937}"#)?;
//!     for entry in doc.iter() {
//!         assert_eq!(entry.kind, EntryType::Book);
//!         println!("{} {}", entry.kind, entry.key);
//!         for field in entry.fields.iter() {
//!             println!("\t{}\t= {}", field.kind, field.value);
//!         }
//!     }
//!     assert_eq!(doc.entries()[0].get(FieldType::Year), Some("1937"));
//!
//!     let err = bibtex::parse("@book{k1, author = \"A\"").unwrap_err();
//!     assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
//!     assert_eq!(err.to_string(), "line 1, column 23: Unexpected end");
//!     Ok(())
//! }
//! ```
//!
//! Reading files is left to the caller; see the `cli` example.

mod errors;
mod keywords;
mod lexer;
mod parser;
mod types;

pub use crate::errors::{ErrorKind, Expected, ParseError, Position, UnknownKeyword};
pub use crate::keywords::{EntryType, FieldType};
pub use crate::lexer::{Lexer, Token};
pub use crate::parser::{parse, Parser};
pub use crate::types::{Document, Entry, Field};
