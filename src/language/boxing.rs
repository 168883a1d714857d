//! Convenience constructors for the leaf, block, and collection kinds.

use super::error::RuntimeError;
use super::location::Location;
use super::types::{Fragments, Kind, Node, Value};

impl Node {
    pub fn nil(location: Location) -> Node {
        Node::new(Kind::Nil, vec![], Value::None, Fragments::default(), location)
    }

    pub fn end(location: Location) -> Node {
        Node::new(Kind::End, vec![], Value::None, Fragments::default(), location)
    }

    /// A symbol's value is its own source text.
    pub fn symbol(kind: Kind, text: impl Into<String>, location: Location) -> Node {
        let text = text.into();
        Node::new(
            kind,
            vec![],
            Value::Text(text.clone()),
            Fragments::new(text, ""),
            location,
        )
    }

    pub fn name(text: impl Into<String>, location: Location) -> Node {
        Node::symbol(Kind::NameSymbol, text, location)
    }

    pub fn operator(text: impl Into<String>, location: Location) -> Node {
        Node::symbol(Kind::OperatorSymbol, text, location)
    }

    pub fn space(text: impl Into<String>, location: Location) -> Node {
        Node::symbol(Kind::SpaceSymbol, text, location)
    }

    /// `repr` is the text the number was written as, kept for rendering.
    pub fn number(value: f64, repr: impl Into<String>, location: Location) -> Node {
        Node::new(
            Kind::Number,
            vec![],
            Value::Number(value),
            Fragments::new(repr, ""),
            location,
        )
    }

    /// A string literal. `raw` is the source between the quotes (escapes
    /// still escaped), `quote` the delimiter, which may be empty for
    /// segments of an interpolated string.
    pub fn string(value: impl Into<String>, raw: &str, quote: &str, location: Location) -> Node {
        Node::new(
            Kind::String,
            vec![],
            Value::Text(value.into()),
            Fragments::new(format!("{}{}", quote, raw), quote),
            location,
        )
    }

    pub fn block(
        kind: Kind,
        children: Vec<Node>,
        start: impl Into<String>,
        end: impl Into<String>,
        location: Location,
    ) -> Node {
        Node::new(
            kind,
            children,
            Value::None,
            Fragments::new(start, end),
            location,
        )
    }

    /// The text of a symbol node, for callers that need a name.
    pub fn symbol_name(&self) -> Result<&str, RuntimeError> {
        match (self.kind().is_symbol(), self.value()) {
            (true, Value::Text(text)) => Ok(text),
            _ => Err(RuntimeError::ExpectedSymbol(
                self.location()
                    .clone(),
            )),
        }
    }
}
