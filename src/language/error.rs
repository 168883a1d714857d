use std::{fmt, path::Path};

use super::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

impl<'i> std::error::Error for LoadingError<'i> {}

/// Errors about values rather than syntax: handing the wrong kind of Node
/// to an operation, or needing a hash from something unhashable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    ExpectedSymbol(Location),
    NotAMap(Location, &'static str),
    Unhashable(Location),
    TaskInUse(Location),
}

impl RuntimeError {
    pub fn location(&self) -> &Location {
        match self {
            RuntimeError::ExpectedSymbol(location) => location,
            RuntimeError::NotAMap(location, _) => location,
            RuntimeError::Unhashable(location) => location,
            RuntimeError::TaskInUse(location) => location,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RuntimeError::ExpectedSymbol(_) => "expected symbol".to_string(),
            RuntimeError::NotAMap(_, operation) => format!("cannot {} non-map", operation),
            RuntimeError::Unhashable(_) => "unhashable object".to_string(),
            RuntimeError::TaskInUse(_) => "tried to reuse an in-use task".to_string(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.location(), self.message())
    }
}

impl std::error::Error for RuntimeError {}
