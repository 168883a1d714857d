use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Where a Node came from. Lines and columns are zero-origin; add one
/// before showing them to humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
    pub cause: Option<Box<Cause>>,
}

/// One link in a "caused by" chain: the message to show and the place it
/// refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub message: String,
    pub location: Location,
}

pub const UNKNOWN_FILE: &str = "about:unknown";

impl Location {
    pub fn new(file: impl Into<Arc<str>>, line: usize, column: usize) -> Location {
        Location {
            file: file.into(),
            line,
            column,
            cause: None,
        }
    }

    pub fn unknown() -> Location {
        Location::new(Arc::from(UNKNOWN_FILE), 0, 0)
    }

    /// Return a copy of this location that remembers it was reached because
    /// of something at `location`.
    pub fn caused_by(&self, message: impl Into<String>, location: Location) -> Location {
        Location {
            cause: Some(Box::new(Cause {
                message: message.into(),
                location,
            })),
            ..self.clone()
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::unknown()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line + 1, self.column + 1)
    }
}
