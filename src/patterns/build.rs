//! Constructors for pattern trees. Patterns are ordinary Nodes; these only
//! save spelling out the kind and value each time.

use crate::language::{Fragments, Kind, Location, Node, Value};

fn pattern(kind: Kind, children: Vec<Node>, value: Value) -> Node {
    Node::new(kind, children, value, Fragments::default(), Location::unknown())
}

/// All children must match, in order.
pub fn sequence(children: Vec<Node>) -> Node {
    pattern(Kind::PatternSequence, children, Value::None)
}

/// Each child is tried as a separate branch; earlier ones take priority.
pub fn alternatives(children: Vec<Node>) -> Node {
    pattern(Kind::PatternAlternatives, children, Value::None)
}

/// The children, as a sequence, zero or one times.
pub fn optional(children: Vec<Node>, greedy: bool) -> Node {
    pattern(Kind::PatternOptional, children, Value::Flag(greedy))
}

/// The children, as a sequence, one or more times.
pub fn repeat(children: Vec<Node>, greedy: bool) -> Node {
    pattern(Kind::PatternRepeat, children, Value::Flag(greedy))
}

/// Zero-width match at the start (true) or end (false) of the input.
pub fn anchor(start: bool) -> Node {
    pattern(Kind::PatternAnchor, vec![], Value::Flag(start))
}

pub fn match_type(kind: Kind) -> Node {
    pattern(Kind::PatternMatchType, vec![], Value::Kind(kind))
}

/// Matches any node with the same kind and structural hash as `target`.
pub fn match_value(target: Node) -> Node {
    pattern(Kind::PatternMatchValue, vec![target], Value::None)
}

/// Record what `inner` matched under `name`.
pub fn capture(name: &str, inner: Node) -> Node {
    pattern(
        Kind::PatternCapture,
        vec![Node::name(name, Location::unknown()), inner],
        Value::None,
    )
}
