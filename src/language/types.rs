//! The one tree value type used for tokens, syntax, and patterns alike.

use std::fmt;

use serde::Serialize;

use super::hash::{hash_str, mix_child, mix_value};
use super::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Nil,
    /// end-of-stream marker emitted last by the tokenizer
    End,
    /// alphanumeric run such as `x`, `hello`, `_QWE_RTY_123`
    NameSymbol,
    /// a single operator character
    OperatorSymbol,
    /// whitespace or a comment; a newline is always its own token
    SpaceSymbol,
    Number,
    String,
    RoundBlock,
    SquareBlock,
    CurlyBlock,
    ToplevelBlock,
    /// a double-quoted string containing interpolations
    StringBlock,
    /// handle to a host function; never hashable
    NativeFunction,
    /// zero width; value true anchors to the start, false to the end
    PatternAnchor,
    /// value is the Kind to match
    PatternMatchType,
    /// children[0] is the node to compare against
    PatternMatchValue,
    /// children[0] is the name symbol, children[1..] is what gets captured
    PatternCapture,
    /// each child is tried separately; leftmost takes precedence
    PatternAlternatives,
    PatternSequence,
    /// children as a sequence, zero or one times; value is greediness
    PatternOptional,
    /// children as a sequence, one or more times; value is greediness
    PatternRepeat,
    List,
    Map,
    KeyValuePair,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::End => "end",
            Kind::NameSymbol => "name_symbol",
            Kind::OperatorSymbol => "operator_symbol",
            Kind::SpaceSymbol => "space_symbol",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::RoundBlock => "round_block",
            Kind::SquareBlock => "square_block",
            Kind::CurlyBlock => "curly_block",
            Kind::ToplevelBlock => "toplevel_block",
            Kind::StringBlock => "string_block",
            Kind::NativeFunction => "native_function",
            Kind::PatternAnchor => "pattern_anchor",
            Kind::PatternMatchType => "pattern_match_type",
            Kind::PatternMatchValue => "pattern_match_value",
            Kind::PatternCapture => "pattern_capture",
            Kind::PatternAlternatives => "pattern_alternatives",
            Kind::PatternSequence => "pattern_sequence",
            Kind::PatternOptional => "pattern_optional",
            Kind::PatternRepeat => "pattern_repeat",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::KeyValuePair => "kv_pair",
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Kind::RoundBlock
                | Kind::SquareBlock
                | Kind::CurlyBlock
                | Kind::ToplevelBlock
                | Kind::StringBlock
        )
    }

    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            Kind::NameSymbol | Kind::OperatorSymbol | Kind::SpaceSymbol
        )
    }

    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            Kind::PatternAnchor
                | Kind::PatternMatchType
                | Kind::PatternMatchValue
                | Kind::PatternCapture
                | Kind::PatternAlternatives
                | Kind::PatternSequence
                | Kind::PatternOptional
                | Kind::PatternRepeat
        )
    }

    /// Pattern instructions that consume exactly one input node.
    pub fn is_value_pattern(&self) -> bool {
        matches!(self, Kind::PatternMatchType | Kind::PatternMatchValue)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The opaque payload of a Node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Number(f64),
    Text(String),
    Flag(bool),
    Kind(Kind),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_kind(&self) -> Option<Kind> {
        match self {
            Value::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Number(number) => write!(f, "{}", number),
            Value::Text(text) => f.write_str(text),
            Value::Flag(flag) => write!(f, "{}", flag),
            Value::Kind(kind) => f.write_str(kind.name()),
        }
    }
}

/// Literal source text surrounding a Node's children. Rendering a Node is
/// `prefix + join(children, joiner) + suffix`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragments {
    pub prefix: String,
    pub suffix: String,
    pub joiner: String,
}

impl Fragments {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Fragments {
        Fragments {
            prefix: prefix.into(),
            suffix: suffix.into(),
            joiner: String::new(),
        }
    }

    pub fn joined(mut self, joiner: impl Into<String>) -> Fragments {
        self.joiner = joiner.into();
        self
    }
}

/// An immutable tagged tree. Once built the hash is fixed; the only code
/// that edits a Node after construction is the in-place map operations,
/// which own their target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: Kind,
    children: Vec<Node>,
    value: Value,
    #[serde(flatten)]
    fragments: Fragments,
    location: Location,
    hash: Option<u64>,
    #[serde(skip)]
    value_in_hash: bool,
}

impl Node {
    /// Build a hashable Node whose value participates in the hash.
    pub fn new(
        kind: Kind,
        children: Vec<Node>,
        value: Value,
        fragments: Fragments,
        location: Location,
    ) -> Node {
        Node::with_hashing(kind, children, value, fragments, location, true, true)
    }

    /// Build a Node with explicit control over hashing. If `hashable` is
    /// false, or any child has no hash, the Node has no hash either.
    pub fn with_hashing(
        kind: Kind,
        children: Vec<Node>,
        value: Value,
        fragments: Fragments,
        location: Location,
        hashable: bool,
        value_in_hash: bool,
    ) -> Node {
        let hash = if hashable {
            structural_hash(kind, &children, &value, value_in_hash)
        } else {
            None
        };

        Node {
            kind,
            children,
            value,
            fragments,
            location,
            hash,
            value_in_hash,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn prefix(&self) -> &str {
        &self
            .fragments
            .prefix
    }

    pub fn suffix(&self) -> &str {
        &self
            .fragments
            .suffix
    }

    pub fn joiner(&self) -> &str {
        &self
            .fragments
            .joiner
    }

    pub fn fragments(&self) -> &Fragments {
        &self.fragments
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn hash(&self) -> Option<u64> {
        self.hash
    }

    /// Replace the children wholesale. Only for containers the caller owns
    /// exclusively (in-place map updates); the hash is recomputed the same
    /// way the constructor would, keeping unhashable containers unhashable.
    pub(crate) fn replace_children(&mut self, children: Vec<Node>) {
        if self
            .hash
            .is_some()
        {
            self.hash = structural_hash(self.kind, &children, &self.value, self.value_in_hash);
        }
        self.children = children;
    }

    /// Full structural comparison: kind, value, and children recursively.
    /// Source text and locations are ignored.
    pub fn same_structure(&self, other: &Node) -> bool {
        self.kind == other.kind
            && self.value == other.value
            && self
                .children
                .len()
                == other
                    .children
                    .len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a.same_structure(b))
    }
}

fn structural_hash(kind: Kind, children: &[Node], value: &Value, value_in_hash: bool) -> Option<u64> {
    let mut hash = hash_str(kind.name());

    for child in children {
        hash = mix_child(hash, child.hash?);
    }

    let value = if value_in_hash {
        hash_str(&value.to_string())
    } else {
        0
    };

    Some(mix_value(hash, value))
}
