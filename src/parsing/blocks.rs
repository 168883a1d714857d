//! Group a flat token stream into nested blocks according to a table of
//! block rules.
//!
//! Delimiters are matched against token text, not raw characters, so a
//! two-character marker like `##` is recognised even though the tokenizer
//! delivers it as two operator tokens. Every end marker, skip sequence, and
//! nested-block trigger of the current rule keeps its own partial-match
//! counter, and all of them advance together as tokens are consumed.

use std::collections::HashMap;

use tracing::trace;

use super::error::ParsingError;
use crate::language::{Kind, Location, Node};

/// Turns the contents of a finished block into its Node. Receives the rule
/// itself, the child Nodes, the opening and closing text, and where the
/// block was opened.
pub type Finish = fn(&BlockRule, Vec<Node>, &str, &str, Location) -> Result<Node, ParsingError>;

pub struct BlockRule {
    pub kind: Kind,
    /// Acceptable terminators; None means end of input will do.
    pub end: Vec<Option<String>>,
    /// Trigger text and the name of the rule to parse when it is seen.
    /// Earlier entries win when more than one completes on the same token.
    pub inner: Vec<(String, String)>,
    /// Sequences which, once complete, suppress end and trigger detection
    /// for that token. Used for escapes like `\"`.
    pub skip: Vec<String>,
    pub finish: Finish,
}

impl BlockRule {
    pub fn new(kind: Kind, finish: Finish) -> BlockRule {
        BlockRule {
            kind,
            end: vec![],
            inner: vec![],
            skip: vec![],
            finish,
        }
    }

    pub fn ends_with(mut self, end: &str) -> BlockRule {
        self.end
            .push(Some(end.to_string()));
        self
    }

    pub fn ends_at_end_of_input(mut self) -> BlockRule {
        self.end
            .push(None);
        self
    }

    pub fn nests(mut self, trigger: &str, rule: &str) -> BlockRule {
        self.inner
            .push((trigger.to_string(), rule.to_string()));
        self
    }

    pub fn skips(mut self, sequence: &str) -> BlockRule {
        self.skip
            .push(sequence.to_string());
        self
    }

    fn accepts_end_of_input(&self) -> bool {
        self.end
            .iter()
            .any(Option::is_none)
    }
}

/// A named set of block rules plus the name of the rule to start from.
pub struct Grammar {
    rules: HashMap<String, BlockRule>,
    toplevel: String,
}

impl Grammar {
    pub fn new(toplevel: &str) -> Grammar {
        Grammar {
            rules: HashMap::new(),
            toplevel: toplevel.to_string(),
        }
    }

    pub fn insert(&mut self, name: &str, rule: BlockRule) {
        self.rules
            .insert(name.to_string(), rule);
    }

    pub fn rule(&self, name: &str) -> Option<&BlockRule> {
        self.rules
            .get(name)
    }

    /// Parse a complete token stream (as produced by `tokenize()`) into a
    /// single Node built by the toplevel rule.
    pub fn parse(&self, tokens: &[Node]) -> Result<Node, ParsingError> {
        let start = tokens
            .first()
            .map(|token| {
                token
                    .location()
                    .clone()
            })
            .unwrap_or_default();

        let rule = self
            .rule(&self.toplevel)
            .ok_or_else(|| ParsingError::UnknownRule(start.clone(), self.toplevel.clone()))?;

        let mut parser = BlockParser {
            grammar: self,
            tokens,
            position: 0,
        };
        parser.parse_block(rule, "", start)
    }
}

/// Progress of one candidate string against the tokens seen so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counter {
    tokens: usize,
    chars: usize,
}

impl Counter {
    /// Feed the next token's text. Returns the number of tokens spanned if
    /// this completes the candidate. A token that does not continue the
    /// candidate resets the counter.
    fn advance(&mut self, candidate: &str, text: &str) -> Option<usize> {
        let remaining = &candidate[self.chars..];
        if text.is_empty() || !remaining.starts_with(text) {
            *self = Counter::default();
            return None;
        }

        self.tokens += 1;
        self.chars += text.len();

        if self.chars >= candidate.len() {
            let spanned = self.tokens;
            *self = Counter::default();
            Some(spanned)
        } else {
            None
        }
    }
}

struct BlockParser<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [Node],
    position: usize,
}

impl<'g, 't> BlockParser<'g, 't> {
    fn parse_block(
        &mut self,
        rule: &'g BlockRule,
        opener: &str,
        opened: Location,
    ) -> Result<Node, ParsingError> {
        let mut contents: Vec<Node> = Vec::new();
        let mut skips = vec![Counter::default(); rule.skip.len()];
        let mut triggers = vec![Counter::default(); rule.inner.len()];
        let mut ends = vec![Counter::default(); rule.end.len()];

        let closer = loop {
            // The End token is never consumed, so enclosing blocks see it too.
            let token = match self
                .tokens
                .get(self.position)
            {
                Some(token) if token.kind() != Kind::End => token,
                _ => {
                    if rule.accepts_end_of_input() {
                        break String::new();
                    }
                    return Err(ParsingError::Unclosed(opened, opener.to_string()));
                }
            };
            self.position += 1;

            let text = token.prefix();

            let mut skipped = false;
            for (counter, sequence) in skips
                .iter_mut()
                .zip(&rule.skip)
            {
                if counter
                    .advance(sequence, text)
                    .is_some()
                {
                    skipped = true;
                }
            }

            let mut nested: Option<(&str, &str, usize)> = None;
            if !skipped {
                for (counter, (trigger, target)) in triggers
                    .iter_mut()
                    .zip(&rule.inner)
                {
                    if let Some(spanned) = counter.advance(trigger, text) {
                        nested.get_or_insert((trigger, target, spanned));
                    }
                }

                let mut finished: Option<(&str, usize)> = None;
                for (counter, end) in ends
                    .iter_mut()
                    .zip(&rule.end)
                {
                    let Some(end) = end else {
                        continue;
                    };
                    if let Some(spanned) = counter.advance(end, text) {
                        finished.get_or_insert((end, spanned));
                    }
                }

                if let Some((end, spanned)) = finished {
                    // the earlier tokens of a multi-token terminator are
                    // already in the buffer; they belong to the closer
                    contents.truncate(contents.len() + 1 - spanned);
                    break end.to_string();
                }
            }

            contents.push(token.clone());

            if let Some((trigger, target, spanned)) = nested {
                let starting = contents.split_off(contents.len() - spanned);
                let location = starting
                    .first()
                    .map(|first| {
                        first
                            .location()
                            .clone()
                    })
                    .unwrap_or_else(|| {
                        token
                            .location()
                            .clone()
                    });

                let inner = self
                    .grammar
                    .rule(target)
                    .ok_or_else(|| ParsingError::UnknownRule(location.clone(), target.to_string()))?;

                trace!("entering {:?} block at {}", trigger, location);
                let block = self.parse_block(inner, trigger, location)?;
                contents.push(block);

                // partial matches never span a nested block
                skips.fill(Counter::default());
                triggers.fill(Counter::default());
                ends.fill(Counter::default());
            }
        };

        (rule.finish)(rule, contents, opener, &closer, opened)
    }
}
