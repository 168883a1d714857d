//! Styling hooks shared by source rendering and diagnostics

use crate::language::Kind;

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Syntax {
    Neutral, // default
    Name,
    Operator,
    Space,
    Comment,
    Numeric,
    String,
    Bracket,
    Pattern,
    Error,
    Gutter,
    Caret,
    Emphasis,
}

impl Syntax {
    /// How a leaf of the given kind should be styled.
    pub fn of(kind: Kind) -> Syntax {
        match kind {
            Kind::NameSymbol => Syntax::Name,
            Kind::OperatorSymbol => Syntax::Operator,
            Kind::SpaceSymbol => Syntax::Space,
            Kind::Number => Syntax::Numeric,
            Kind::String | Kind::StringBlock => Syntax::String,
            Kind::RoundBlock
            | Kind::SquareBlock
            | Kind::CurlyBlock
            | Kind::List
            | Kind::Map
            | Kind::KeyValuePair => Syntax::Bracket,
            kind if kind.is_pattern() => Syntax::Pattern,
            _ => Syntax::Neutral,
        }
    }
}

/// Trait for different styling backends (the no-op no-markup one, ANSI
/// escapes for terminal colouring)
pub trait Highlight {
    /// Apply styling to content with the specified syntax type
    fn style(&self, syntax: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Highlight for Identity {
    fn style(&self, _syntax: Syntax, content: &str) -> String {
        content.to_string()
    }
}
