//! Turn raw text into a flat sequence of leaf Nodes.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::trace;

use crate::language::{Kind, Location, Node};

/// What to do with the text a rule matched. Returning None declines the
/// match and lets the next rule have a go.
type Transform = fn(&str, Location) -> Option<Node>;

struct Rule {
    pattern: Regex,
    transform: Transform,
}

// Tried in order at the current offset; the first that matches wins. The
// last rule matches any single character so tokenizing always progresses.
fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let table: [(&str, Transform); 6] = [
            (r"^(?i:0x[0-9a-f]+|-?0b[01]+)", radix_number),
            (r"^(?i:(?:\.[0-9]+|[0-9]+\.?[0-9]*)(?:e[+-]?[0-9]+)?)", decimal_number),
            (r"^\p{P}", |text, location| {
                Some(Node::operator(text, location))
            }),
            (r"^\p{Alphabetic}[\p{Alphabetic}\p{N}_]*", |text, location| {
                Some(Node::name(text, location))
            }),
            (r"^(?:\n|[^\S\n]+)", |text, location| {
                Some(Node::space(text, location))
            }),
            (r"^(?s:.)", |text, location| {
                Some(Node::operator(text, location))
            }),
        ];

        table
            .into_iter()
            .map(|(pattern, transform)| Rule {
                pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("{}", e)),
                transform,
            })
            .collect()
    })
}

fn radix_number(text: &str, location: Location) -> Option<Node> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let radix = match digits
        .get(1..2)?
        .to_ascii_lowercase()
        .as_str()
    {
        "x" => 16,
        "b" => 2,
        _ => return None,
    };

    // accumulate as a float so oversized literals lose precision rather
    // than failing
    let magnitude = digits[2..]
        .chars()
        .try_fold(0.0f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * radix as f64 + d as f64)
        })?;

    let value = if negative { -magnitude } else { magnitude };
    Some(Node::number(value, text, location))
}

fn decimal_number(text: &str, location: Location) -> Option<Node> {
    let value = text
        .parse::<f64>()
        .ok()?;
    Some(Node::number(value, text, location))
}

/// Split `source` into tokens. The result always ends with a single
/// `Kind::End` node positioned just past the last character.
pub fn tokenize(source: &str, filename: &str) -> Vec<Node> {
    let file: Arc<str> = Arc::from(filename);
    let mut tokens = Vec::new();
    let mut line = 0;
    let mut column = 0;
    let mut rest = source;

    'tokens: while !rest.is_empty() {
        for rule in rules() {
            let Some(found) = rule
                .pattern
                .find(rest)
            else {
                continue;
            };
            let chunk = found.as_str();
            if chunk.is_empty() {
                continue;
            }

            let location = Location::new(file.clone(), line, column);
            let Some(token) = (rule.transform)(chunk, location) else {
                continue;
            };
            tokens.push(token);

            match chunk.rfind('\n') {
                Some(i) => {
                    line += chunk
                        .matches('\n')
                        .count();
                    column = chunk[i + 1..]
                        .chars()
                        .count();
                }
                None => {
                    column += chunk
                        .chars()
                        .count();
                }
            }

            rest = &rest[chunk.len()..];
            continue 'tokens;
        }

        // the catch-all rule matches any character, so this is a bug
        unreachable!("no tokenizer rule matched at {}:{}:{}", filename, line + 1, column + 1);
    }

    tokens.push(Node::end(Location::new(file, line, column)));
    trace!("{} tokens from {}", tokens.len(), filename);
    tokens
}
