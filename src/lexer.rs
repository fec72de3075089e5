use std::fmt;

use tracing::trace;

use crate::errors::{ErrorKind, Position};

/// A token is one semantic unit read from the bib source.
/// Remember, that a bib entry looks as follows:
///
/// ```tex
/// @Book{works4,
///   author = "Shakespeare, William",
///   year   = 1609,
/// }
/// ```
///
/// In this case, the lexer would emit the following Token instances:
/// (At, Id("Book"), LBrace, Id("works4"), Comma, Id("author"), Eq,
/// Str("Shakespeare, William"), Comma, Id("year"), Eq, Number("1609"),
/// Comma, RBrace, EndOfInput). Identifiers are not classified here;
/// whether `Book` is an entry type or a key is up to the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    EndOfInput,
    /// maximal run of ASCII letters and digits starting with a letter
    Id(String),
    At,
    LBrace,
    RBrace,
    Eq,
    Comma,
    /// raw text between two `"`, without the quotes
    Str(String),
    /// maximal run of ASCII digits
    Number(String),
    /// a character which starts no token
    Invalid(char),
    /// scanning failed, e.g. a string was never closed
    Error(ErrorKind),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "end of input"),
            Self::Id(s) => write!(f, "{}", s),
            Self::At => write!(f, "@"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Eq => write!(f, "="),
            Self::Comma => write!(f, ","),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Number(s) => write!(f, "{}", s),
            Self::Invalid(chr) => write!(f, "{:?}", chr),
            Self::Error(kind) => write!(f, "{}", kind),
        }
    }
}

// Matches C's isspace, so a vertical tab separates tokens too.
fn is_whitespace(chr: char) -> bool {
    matches!(chr, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Pull-based scanner over a bib source. Each call to `next_token`
/// skips whitespace and produces exactly one token with the position
/// of its first character.
#[derive(Clone, Debug)]
pub struct Lexer<'s> {
    src: &'s str,
    pos: usize, // byte offset into `src`
    row: usize,
    column: usize,
    finished: bool, // did the iterator hand out EndOfInput already?
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Lexer<'s> {
        Lexer {
            src,
            pos: 0,
            row: 1,
            column: 1,
            finished: false,
        }
    }

    /// Position of the next unread character
    fn here(&self) -> Position {
        Position::new(self.row, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let chr = self.peek()?;
        if chr == '\n' {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += chr.len_utf8();
        Some(chr)
    }

    fn take_while<P: Fn(char) -> bool>(&mut self, pred: P) -> &'s str {
        let start = self.pos;
        while self.peek().map_or(false, &pred) {
            self.advance();
        }
        &self.src[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    /// Reads `"…"`. Embedded quotes are not supported: the first `"` after
    /// the opening one always closes the string.
    fn lex_string(&mut self) -> Token {
        self.advance();
        let start = self.pos;
        loop {
            match self.peek() {
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
                None => return Token::Error(ErrorKind::UnterminatedString),
            }
        }
        let text = &self.src[start..self.pos];
        self.advance();
        Token::Str(text.to_string())
    }

    /// Produce the next token together with the position it starts at.
    /// Once the input is exhausted, every call returns `EndOfInput`.
    pub fn next_token(&mut self) -> (Token, Position) {
        self.skip_whitespace();
        let info = self.here();

        let token = match self.peek() {
            None => Token::EndOfInput,
            Some(chr) if chr.is_ascii_alphabetic() => {
                Token::Id(self.take_while(|c| c.is_ascii_alphanumeric()).to_string())
            }
            Some(chr) if chr.is_ascii_digit() => {
                Token::Number(self.take_while(|c| c.is_ascii_digit()).to_string())
            }
            Some('"') => self.lex_string(),
            Some(chr) => {
                self.advance();
                match chr {
                    '@' => Token::At,
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '=' => Token::Eq,
                    ',' => Token::Comma,
                    _ => Token::Invalid(chr),
                }
            }
        };

        trace!(row = info.row, column = info.column, "token {:?}", token);
        (token, info)
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = (Token, Position);

    /// Yields all tokens including the final `EndOfInput`, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (token, info) = self.next_token();
        if token == Token::EndOfInput {
            self.finished = true;
        }
        Some((token, info))
    }
}
