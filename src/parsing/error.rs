use std::fmt;

use crate::language::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    /// The block opened by `opener` at this location ran out of input.
    Unclosed(Location, String),
    /// Escaped character not in the known set.
    UnknownEscape(Location),
    /// Escape present but malformed, for instance too few hex digits.
    InvalidEscape(Location),
    EscapeOutOfRange(Location),
    /// A variable-width `\u` escape without its `{...}` block. The second
    /// location is the start of the enclosing string.
    ExpectedBrace(Location, String, Location),
    /// The grammar refers to a rule it does not define.
    UnknownRule(Location, String),
}

/// A secondary message attached to an error, pointing somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub message: String,
    pub location: Location,
}

impl ParsingError {
    pub fn location(&self) -> &Location {
        match self {
            ParsingError::Unclosed(location, _) => location,
            ParsingError::UnknownEscape(location) => location,
            ParsingError::InvalidEscape(location) => location,
            ParsingError::EscapeOutOfRange(location) => location,
            ParsingError::ExpectedBrace(location, _, _) => location,
            ParsingError::UnknownRule(location, _) => location,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::Unclosed(_, opener) => format!("{:?} was never closed", opener),
            ParsingError::UnknownEscape(_) => "unknown escaped character".to_string(),
            ParsingError::InvalidEscape(_) => "invalid escape sequence".to_string(),
            ParsingError::EscapeOutOfRange(_) => "escape out of range".to_string(),
            ParsingError::ExpectedBrace(_, after, _) => {
                format!("expected \"{{\" after \"\\{}\"", after)
            }
            ParsingError::UnknownRule(_, name) => format!("no block rule named {:?}", name),
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        match self {
            ParsingError::ExpectedBrace(_, _, string) => vec![Note {
                message: "note: use ' instead of \" to make this a raw string".to_string(),
                location: string.clone(),
            }],
            _ => vec![],
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.location(), self.message())
    }
}

impl std::error::Error for ParsingError {}
