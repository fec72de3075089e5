use std::convert;
use std::str;

use tracing::{debug, trace};

use crate::errors::{ErrorKind, ParseError};
use crate::keywords::{EntryType, FieldType};
use crate::lexer::{Lexer, Token};
use crate::types::{Document, Entry, Field};

/// Parser turning a bib source into a `Document`
#[derive(Debug, Clone)]
pub struct Parser {
    pub(crate) src: String,
}

impl Parser {
    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser { src: data }
    }

    pub fn source(&self) -> &str {
        &self.src
    }

    /// Parse the whole source. Every call starts from scratch, so
    /// parsing twice yields the same result.
    pub fn parse(&self) -> Result<Document, ParseError> {
        parse(&self.src)
    }

    /// The raw token stream of the source, ending with `Token::EndOfInput`
    pub fn tokens(&self) -> Lexer<'_> {
        Lexer::new(&self.src)
    }
}

impl str::FromStr for Parser {
    type Err = convert::Infallible;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// Where the parser is within the grammar
///
/// ```text
/// document := (entry)*
/// entry    := '@' ENTRY_TYPE '{' KEY (',' field)* '}'
/// field    := FIELD_TYPE '=' (STRING | NUMBER)
/// ```
///
/// The entry under construction travels inside the state until its `}`
/// is seen, so an unfinished entry never reaches the document.
#[derive(Debug)]
enum State {
    /// at the start of the document or after `}`
    ExpectEntryStart,
    /// after `@`
    ExpectEntryType,
    ExpectLbrace(EntryType),
    ExpectKey(EntryType),
    /// after the key or a field value
    ExpectCommaOrEnd(Entry),
    /// after `,`
    ExpectFieldKeyOrEnd(Entry),
    ExpectFieldEq(Entry, FieldType),
    ExpectFieldValue(Entry, FieldType),
    Done,
}

impl State {
    /// Feed one token. Returns the follow-up state or the kind of error
    /// the token causes; the error is located at the token itself.
    fn step(self, token: Token, document: &mut Document) -> Result<State, ErrorKind> {
        use ErrorKind as E;
        use State as S;
        use Token as T;

        match (self, token) {
            (_, T::Invalid(_)) => Err(E::InvalidToken),
            (_, T::Error(kind)) => Err(kind),
            (S::Done, _) => Ok(S::Done),

            (S::ExpectEntryStart, T::EndOfInput) => Ok(S::Done),
            (S::ExpectEntryStart, T::At) => Ok(S::ExpectEntryType),
            (S::ExpectEntryStart, _) => Err(E::EXPECT_AT),

            // everywhere else the grammar requires another token
            (_, T::EndOfInput) => Err(E::UnexpectedEnd),

            (S::ExpectEntryType, T::Id(word)) => EntryType::lookup(&word)
                .map(S::ExpectLbrace)
                .ok_or(E::InvalidEntryType),
            (S::ExpectEntryType, _) => Err(E::EXPECT_ID),

            (S::ExpectLbrace(kind), T::LBrace) => Ok(S::ExpectKey(kind)),
            (S::ExpectLbrace(_), _) => Err(E::EXPECT_LBRACE),

            (S::ExpectKey(kind), T::Id(key)) => Ok(S::ExpectCommaOrEnd(Entry::new(kind, key))),
            (S::ExpectKey(_), _) => Err(E::EXPECT_ID),

            (S::ExpectCommaOrEnd(entry), T::Comma) => Ok(S::ExpectFieldKeyOrEnd(entry)),
            (S::ExpectCommaOrEnd(entry) | S::ExpectFieldKeyOrEnd(entry), T::RBrace) => {
                trace!(key = %entry.key, fields = entry.fields.len(), "closed entry");
                document.push(entry);
                Ok(S::ExpectEntryStart)
            }
            (S::ExpectCommaOrEnd(_), _) => Err(E::EXPECT_COMMA_OR_RBRACE),

            (S::ExpectFieldKeyOrEnd(entry), T::Id(word)) => match FieldType::lookup(&word) {
                Some(kind) => Ok(S::ExpectFieldEq(entry, kind)),
                None => Err(E::InvalidFieldType),
            },
            (S::ExpectFieldKeyOrEnd(_), _) => Err(E::EXPECT_ID_OR_RBRACE),

            (S::ExpectFieldEq(entry, kind), T::Eq) => Ok(S::ExpectFieldValue(entry, kind)),
            (S::ExpectFieldEq(..), _) => Err(E::EXPECT_EQ),

            (S::ExpectFieldValue(mut entry, kind), T::Str(value) | T::Number(value)) => {
                entry.fields.push(Field::new(kind, value));
                Ok(S::ExpectCommaOrEnd(entry))
            }
            (S::ExpectFieldValue(..), _) => Err(E::EXPECT_VALUE),
        }
    }
}

/// Parse a complete bib source.
///
/// Stops at the first error. In that case only the error is returned
/// and everything parsed so far is dropped.
pub fn parse(src: &str) -> Result<Document, ParseError> {
    debug!(bytes = src.len(), "parsing bib source");

    let mut lexer = Lexer::new(src);
    let mut document = Document::new();
    let mut state = State::ExpectEntryStart;

    while !matches!(state, State::Done) {
        let (token, info) = lexer.next_token();
        state = match state.step(token, &mut document) {
            Ok(next) => next,
            Err(kind) => {
                debug!(row = info.row, column = info.column, error = %kind, "parsing failed");
                return Err(ParseError::new(kind, info));
            }
        };
        trace!(?state, "parser state");
    }

    debug!(entries = document.len(), "parsed bib source");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Position;
    use std::error;
    use std::str::FromStr;

    fn fail(src: &str) -> (ErrorKind, usize, usize) {
        let err = parse(src).unwrap_err();
        (err.kind, err.row(), err.column())
    }

    #[test]
    fn test_book() -> Result<(), Box<dyn error::Error>> {
        let doc = parse(r#"@book{k1,title="T",year=1999}"#)?;
        assert_eq!(doc.len(), 1);
        let entry = &doc.entries()[0];
        assert_eq!(entry.kind, EntryType::Book);
        assert_eq!(entry.key, "k1");
        assert_eq!(
            entry.fields,
            vec![
                Field::new(FieldType::Title, "T".to_string()),
                Field::new(FieldType::Year, "1999".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_taocp() -> Result<(), Box<dyn error::Error>> {
        let src = r#"
@Book{Knuth97,
  author    = "Donald Ervin Knuth",
  title     = "The art of computer programming, Volume {I:} Fundamental Algorithms,
               3rd Edition",
  publisher = "Addison-Wesley",
  year      = 1997,
  url       = "https://www.worldcat.org/oclc/312910844",
  isbn      = "0201896834",
}

@ARTICLE{ dijkstra68 , AUTHOR = "Edsger W. Dijkstra" , Note = "a" , note = "b" }
@misc{bare}
"#;
        let p = Parser::from_str(src)?;
        let doc = p.parse()?;
        assert_eq!(doc.len(), 3);

        let knuth = doc.find("Knuth97").ok_or("missing Knuth97")?;
        assert_eq!(knuth.kind, EntryType::Book);
        assert_eq!(knuth.fields.len(), 6);
        assert_eq!(knuth.get(FieldType::Year), Some("1997"));
        assert_eq!(
            knuth.get(FieldType::Title),
            Some("The art of computer programming, Volume {I:} Fundamental Algorithms,\n               3rd Edition")
        );

        let dijkstra = &doc.entries()[1];
        assert_eq!(dijkstra.kind, EntryType::Article);
        assert_eq!(dijkstra.key, "dijkstra68");
        let kinds: Vec<FieldType> = dijkstra.fields.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FieldType::Author, FieldType::Note, FieldType::Note]);
        assert_eq!(dijkstra.get_all(FieldType::Note).collect::<Vec<_>>(), vec!["a", "b"]);

        assert_eq!(doc.entries()[2].kind, EntryType::Misc);
        assert!(doc.entries()[2].fields.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_input() -> Result<(), Box<dyn error::Error>> {
        assert!(parse("")?.is_empty());
        assert!(parse(" \n\t \r\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_trailing_comma() -> Result<(), Box<dyn error::Error>> {
        let doc = parse("@misc{k1, year = 2001, }")?;
        assert_eq!(doc.entries()[0].fields.len(), 1);
        assert_eq!(parse("@misc{k1,}")?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_rbrace() {
        assert_eq!(fail(r#"@misc{k1,author="A""#), (ErrorKind::UnexpectedEnd, 1, 20));
    }

    #[test]
    fn test_unexpected_end() {
        assert_eq!(fail("@").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{k").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{k,").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{k,year").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{k,year=").0, ErrorKind::UnexpectedEnd);
        assert_eq!(fail("@book{k,year=1\n"), (ErrorKind::UnexpectedEnd, 2, 1));
    }

    #[test]
    fn test_invalid_types() {
        assert_eq!(fail("@foo{k1,}"), (ErrorKind::InvalidEntryType, 1, 2));
        assert_eq!(fail("\n  @article{k1,bogus=\"x\"}"), (ErrorKind::InvalidFieldType, 2, 15));
        // keyword checks run before the following token is looked at
        assert_eq!(fail("@foo"), (ErrorKind::InvalidEntryType, 1, 2));
        assert_eq!(fail("@book{k,bogus"), (ErrorKind::InvalidFieldType, 1, 9));
    }

    #[test]
    fn test_expectations() {
        assert_eq!(fail("book{k}"), (ErrorKind::EXPECT_AT, 1, 1));
        assert_eq!(fail("@book{k} misc"), (ErrorKind::EXPECT_AT, 1, 10));
        assert_eq!(fail("@{k}"), (ErrorKind::EXPECT_ID, 1, 2));
        assert_eq!(fail("@book k"), (ErrorKind::EXPECT_LBRACE, 1, 7));
        assert_eq!(fail("@book{1}"), (ErrorKind::EXPECT_ID, 1, 7));
        assert_eq!(fail("@book{k year}"), (ErrorKind::EXPECT_COMMA_OR_RBRACE, 1, 9));
        assert_eq!(fail("@book{k,=}"), (ErrorKind::EXPECT_ID_OR_RBRACE, 1, 9));
        assert_eq!(fail("@book{k,year 1}"), (ErrorKind::EXPECT_EQ, 1, 14));
        assert_eq!(fail("@book{k,year=}"), (ErrorKind::EXPECT_VALUE, 1, 14));
        assert_eq!(fail("@book{k,year=1 title}"), (ErrorKind::EXPECT_COMMA_OR_RBRACE, 1, 16));
        assert_eq!(fail("@book{k,year=1}}"), (ErrorKind::EXPECT_AT, 1, 16));
    }

    #[test]
    fn test_lexical_errors() {
        assert_eq!(fail("@book{k,title=\"open\n\n"), (ErrorKind::UnterminatedString, 1, 15));
        assert_eq!(fail("@book{k:1}"), (ErrorKind::InvalidToken, 1, 8));
        assert_eq!(fail("#"), (ErrorKind::InvalidToken, 1, 1));
        assert_eq!(fail("@book{k}\n%"), (ErrorKind::InvalidToken, 2, 1));
    }

    #[test]
    fn test_values_are_raw() -> Result<(), Box<dyn error::Error>> {
        let src = "@misc{k, note = \"  Tom~\\& {Jerry} --\n  x \", year = 0042}";
        let p = Parser::from_str(src)?;
        assert_eq!(p.source(), src);
        let doc = p.parse()?;
        let entry = &doc.entries()[0];
        assert_eq!(entry.get(FieldType::Note), Some("  Tom~\\& {Jerry} --\n  x "));
        assert_eq!(entry.get(FieldType::Year), Some("0042"));
        Ok(())
    }

    #[test]
    fn test_parser_is_repeatable() -> Result<(), Box<dyn error::Error>> {
        let p = Parser::from_string("@book{a,year=1}@book{b,".to_string());
        assert_eq!(p.parse(), p.parse());
        assert_eq!(p.parse().unwrap_err().position, Position::new(1, 24));
        assert_eq!(p.tokens().count(), 15);
        Ok(())
    }
}
