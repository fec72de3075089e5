use std::error;
use std::fmt;

/// A 1-based row/column position in the source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Position {
        Position { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.row, self.column)
    }
}

/// One token kind the parser would have accepted at the point of failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    Id,
    At,
    LBrace,
    RBrace,
    Eq,
    Comma,
    String,
    Number,
}

impl Expected {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::At => "@",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Eq => "=",
            Self::Comma => ",",
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

/// What went wrong while parsing.
///
/// `Expect` lists every token kind that would have been a valid
/// continuation at the failing position, so a message like
/// “Expect , or }” can be rendered from it. Three positions admit two
/// tokens: after `,` (`EXPECT_ID_OR_RBRACE`), after a field value
/// (`EXPECT_COMMA_OR_RBRACE`), and after `=`, where a string or a number
/// may follow (`EXPECT_VALUE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A `"` was opened but the input ended before it was closed
    UnterminatedString,
    /// The input ended where the grammar requires another token
    UnexpectedEnd,
    /// A character which starts no token
    InvalidToken,
    Expect(&'static [Expected]),
    InvalidEntryType,
    InvalidFieldType,
}

impl ErrorKind {
    pub const EXPECT_ID: ErrorKind = ErrorKind::Expect(&[Expected::Id]);
    pub const EXPECT_AT: ErrorKind = ErrorKind::Expect(&[Expected::At]);
    pub const EXPECT_LBRACE: ErrorKind = ErrorKind::Expect(&[Expected::LBrace]);
    pub const EXPECT_RBRACE: ErrorKind = ErrorKind::Expect(&[Expected::RBrace]);
    pub const EXPECT_EQ: ErrorKind = ErrorKind::Expect(&[Expected::Eq]);
    pub const EXPECT_COMMA: ErrorKind = ErrorKind::Expect(&[Expected::Comma]);
    pub const EXPECT_STRING: ErrorKind = ErrorKind::Expect(&[Expected::String]);
    pub const EXPECT_NUMBER: ErrorKind = ErrorKind::Expect(&[Expected::Number]);
    pub const EXPECT_ID_OR_RBRACE: ErrorKind = ErrorKind::Expect(&[Expected::Id, Expected::RBrace]);
    pub const EXPECT_COMMA_OR_RBRACE: ErrorKind =
        ErrorKind::Expect(&[Expected::Comma, Expected::RBrace]);
    pub const EXPECT_VALUE: ErrorKind = ErrorKind::Expect(&[Expected::String, Expected::Number]);

    /// Human-readable message for this kind, e.g. “Expect , or }”
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Token kinds that would have been accepted. Empty unless this is `Expect`.
    pub fn expected(&self) -> &'static [Expected] {
        match *self {
            Self::Expect(alternatives) => alternatives,
            _ => &[],
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => f.write_str("Unterminated string"),
            Self::UnexpectedEnd => f.write_str("Unexpected end"),
            Self::InvalidToken => f.write_str("Invalid token"),
            Self::Expect([]) => f.write_str("Unknown error"),
            Self::Expect([first, rest @ ..]) => {
                write!(f, "Expect {}", first.symbol())?;
                for alternative in rest {
                    write!(f, " or {}", alternative.symbol())?;
                }
                Ok(())
            }
            Self::InvalidEntryType => f.write_str("Invalid entry type"),
            Self::InvalidFieldType => f.write_str("Invalid field type"),
        }
    }
}

/// The first error found in the input. Parsing stops there; nothing
/// parsed before it is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> ParseError {
        ParseError { kind, position }
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

impl error::Error for ParseError {}

/// Returned when a string names neither an entry type nor a field type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKeyword(pub String);

impl fmt::Display for UnknownKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyword '{}'", self.0)
    }
}

impl error::Error for UnknownKeyword {}
