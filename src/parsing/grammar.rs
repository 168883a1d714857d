//! The default block grammar: brackets, strings, and comments.

use super::blocks::{BlockRule, Grammar};
use super::error::ParsingError;
use crate::formatting::unparse;
use crate::language::{Kind, Location, Node};

// Openers recognised inside code blocks, in priority order.
const BASE_BLOCKS: [(&str, &str); 7] = [
    ("(", "round"),
    ("[", "square"),
    ("{", "curly"),
    ("\"", "string"),
    ("'", "rawstring"),
    ("##", "comment"),
    ("# ", "line_comment"),
];

fn with_base_blocks(mut rule: BlockRule) -> BlockRule {
    for (trigger, target) in BASE_BLOCKS {
        rule = rule.nests(trigger, target);
    }
    rule
}

impl Default for Grammar {
    fn default() -> Self {
        let mut grammar = Grammar::new("toplevel");

        grammar.insert(
            "toplevel",
            with_base_blocks(BlockRule::new(Kind::ToplevelBlock, make_block).ends_at_end_of_input()),
        );
        grammar.insert(
            "round",
            with_base_blocks(BlockRule::new(Kind::RoundBlock, make_block).ends_with(")")),
        );
        grammar.insert(
            "square",
            with_base_blocks(BlockRule::new(Kind::SquareBlock, make_block).ends_with("]")),
        );
        grammar.insert(
            "curly",
            with_base_blocks(BlockRule::new(Kind::CurlyBlock, make_block).ends_with("}")),
        );
        grammar.insert(
            "string_interpolation",
            with_base_blocks(BlockRule::new(Kind::RoundBlock, make_block).ends_with("}")),
        );
        grammar.insert(
            "string",
            BlockRule::new(Kind::String, make_string)
                .ends_with("\"")
                .skips("\\\"")
                .skips("\\\\")
                .skips("\\{")
                .nests("{", "string_interpolation"),
        );
        grammar.insert(
            "rawstring",
            BlockRule::new(Kind::String, make_raw_string)
                .ends_with("'")
                .skips("\\'")
                .skips("\\\\"),
        );
        grammar.insert(
            "comment",
            BlockRule::new(Kind::SpaceSymbol, make_comment).ends_with("##"),
        );
        grammar.insert(
            "line_comment",
            BlockRule::new(Kind::SpaceSymbol, make_comment)
                .ends_with("\n")
                .ends_at_end_of_input(),
        );

        grammar
    }
}

fn make_block(
    rule: &BlockRule,
    items: Vec<Node>,
    start: &str,
    end: &str,
    location: Location,
) -> Result<Node, ParsingError> {
    Ok(Node::block(rule.kind, items, start, end, location))
}

/// Comments become a single whitespace symbol holding their full text, so
/// they vanish from evaluation but survive rendering.
fn make_comment(
    _rule: &BlockRule,
    items: Vec<Node>,
    start: &str,
    end: &str,
    location: Location,
) -> Result<Node, ParsingError> {
    let mut text = start.to_string();
    for item in &items {
        text.push_str(&unparse(item));
    }
    text.push_str(end);

    Ok(Node::space(text, location))
}

fn make_raw_string(
    _rule: &BlockRule,
    items: Vec<Node>,
    start: &str,
    _end: &str,
    location: Location,
) -> Result<Node, ParsingError> {
    let raw: String = items
        .iter()
        .map(unparse)
        .collect();

    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('\'' | '\\')) => value.push(escaped),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => value.push('\\'),
            }
        } else {
            value.push(c);
        }
    }

    Ok(Node::string(value, &raw, start, location))
}

/// Accumulates one literal stretch of an interpolated string.
#[derive(Default)]
struct Segment {
    value: String,
    raw: String,
    location: Option<Location>,
}

impl Segment {
    fn push(&mut self, value: &str, raw: &str) {
        self.value
            .push_str(value);
        self.raw
            .push_str(raw);
    }

    fn is_empty(&self) -> bool {
        self.raw
            .is_empty()
    }

    fn take(&mut self, fallback: &Location) -> Node {
        let segment = std::mem::take(self);
        let location = segment
            .location
            .unwrap_or_else(|| fallback.clone());
        Node::string(segment.value, &segment.raw, "", location)
    }
}

fn make_string(
    _rule: &BlockRule,
    items: Vec<Node>,
    start: &str,
    _end: &str,
    location: Location,
) -> Result<Node, ParsingError> {
    let mut pieces: Vec<Node> = Vec::new();
    let mut segment = Segment::default();
    let mut items = items.into_iter();

    while let Some(item) = items.next() {
        if item
            .kind()
            .is_block()
        {
            if !segment.is_empty() {
                pieces.push(segment.take(&location));
            }
            pieces.push(item);
            continue;
        }

        if segment
            .location
            .is_none()
        {
            segment.location = Some(
                item.location()
                    .clone(),
            );
        }

        if item.prefix() != "\\" {
            segment.push(item.prefix(), item.prefix());
            continue;
        }

        let Some(next) = items.next() else {
            return Err(ParsingError::InvalidEscape(
                item.location()
                    .clone(),
            ));
        };
        let text = next.prefix();

        if matches!(text, "'" | "\"" | "{" | "}") {
            segment.push(text, &format!("\\{}", text));
        } else if !next
            .kind()
            .is_symbol()
        {
            return Err(ParsingError::InvalidEscape(
                next.location()
                    .clone(),
            ));
        } else if text.eq_ignore_ascii_case("u") {
            // variable width form, \u{...}, whose braces arrive as an
            // interpolation block
            match items.next() {
                Some(block)
                    if block
                        .kind()
                        .is_block() =>
                {
                    let escape = format!("{}{}", text, unparse(&block));
                    let decoded = decode_braced(&escape, block.location())?;
                    segment.push(&decoded, &format!("\\{}", escape));
                }
                other => {
                    let at = other
                        .as_ref()
                        .unwrap_or(&next)
                        .location()
                        .clone();
                    return Err(ParsingError::ExpectedBrace(at, text.to_string(), location));
                }
            }
        } else {
            let decoded = decode_escape(text, next.location())?;
            segment.push(&decoded, &format!("\\{}", text));
        }
    }

    if pieces.is_empty() {
        // plain string, no interpolation
        return Ok(Node::string(segment.value, &segment.raw, start, location));
    }
    if !segment.is_empty() {
        pieces.push(segment.take(&location));
    }

    Ok(Node::block(Kind::StringBlock, pieces, start, start, location))
}

/// Decode the text following a backslash, for example `n`, `x41`, or
/// `u00e9rest`. Characters beyond the escape itself pass through.
fn decode_escape(text: &str, location: &Location) -> Result<String, ParsingError> {
    let Some(first) = text
        .chars()
        .next()
    else {
        return Err(ParsingError::InvalidEscape(location.clone()));
    };

    let width = match first {
        'a' | 'b' | 'e' | 'f' | 'n' | 'r' | 't' | 'v' | 'z' | '"' | '\'' | '\\' => 1,
        'x' => 3,
        'u' => 5,
        _ => return Err(ParsingError::UnknownEscape(location.clone())),
    };

    let split = text
        .char_indices()
        .nth(width)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (head, rest) = text.split_at(split);

    let digits = &head[first.len_utf8()..];
    if head
        .chars()
        .count()
        < width
        || !digits
            .chars()
            .all(|c| c.is_ascii_hexdigit())
    {
        return Err(ParsingError::InvalidEscape(location.clone()));
    }

    let decoded = match first {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'e' => '\u{1b}',
        'f' => '\u{0c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0b}',
        'z' => '\0',
        'x' | 'u' => code_point(digits, location)?,
        other => other,
    };

    let mut result = String::with_capacity(text.len());
    result.push(decoded);
    result.push_str(rest);
    Ok(result)
}

/// Decode `u{XXXX}` with any number of hex digits.
fn decode_braced(escape: &str, location: &Location) -> Result<String, ParsingError> {
    let digits = escape
        .get(1..)
        .and_then(|s| s.strip_prefix('{'))
        .and_then(|s| s.strip_suffix('}'))
        .filter(|s| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_hexdigit())
        })
        .ok_or_else(|| ParsingError::InvalidEscape(location.clone()))?;

    Ok(code_point(digits, location)?.to_string())
}

fn code_point(digits: &str, location: &Location) -> Result<char, ParsingError> {
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| ParsingError::EscapeOutOfRange(location.clone()))
}
