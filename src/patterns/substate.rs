//! One thread of the pattern automaton.
//!
//! The pattern tree is never compiled. A substate's program counter is a
//! path of frames from the pattern root down to the active instruction,
//! each frame holding a compound pattern Node and the index of the child
//! being executed. Entering a group pushes a frame; running off the end of
//! a frame's children pops it and lets the group's kind decide what comes
//! next. Substates are immutable; `step()` returns successors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::language::hash::mix_pair;
use crate::language::{Kind, Node};

#[derive(Clone, Copy)]
pub(crate) struct Frame<'p> {
    pub node: &'p Node,
    pub index: usize,
}

impl<'p> Frame<'p> {
    pub fn new(node: &'p Node, index: usize) -> Frame<'p> {
        Frame { node, index }
    }

    fn current(&self) -> Option<&'p Node> {
        self.node
            .children()
            .get(self.index)
    }

    fn hash(&self) -> u64 {
        // a pattern holding an unhashable value falls back to its address
        self.node
            .hash()
            .unwrap_or(self.node as *const Node as usize as u64)
            ^ (self.index as u64).rotate_left(19)
    }
}

// Frames refer to the same place in the same pattern tree, not to
// structurally similar ones.
impl<'p> PartialEq for Frame<'p> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node) && self.index == other.index
    }
}

impl<'p> fmt::Debug for Frame<'p> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.node.kind(), self.index)
    }
}

/// Capture spans in progress: start index, and end index once closed.
pub(crate) type Spans = BTreeMap<String, (usize, Option<usize>)>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Substate<'p> {
    pub start: usize,
    /// which of the supplied patterns this is an attempt at
    pub pattern: usize,
    pub path: Vec<Frame<'p>>,
    pub spans: Spans,
    pub atomic: BTreeSet<String>,
    pub complete: bool,
    pub hash: u64,
}

impl<'p> Substate<'p> {
    pub fn new(start: usize, pattern: usize, path: Vec<Frame<'p>>, spans: Spans, complete: bool) -> Substate<'p> {
        Substate::assemble(start, pattern, path, spans, BTreeSet::new(), complete)
    }

    /// A fresh attempt at matching `root` beginning at `start`.
    pub fn seed(start: usize, pattern: usize, root: &'p Node) -> Substate<'p> {
        Substate::new(start, pattern, vec![Frame::new(root, 0)], Spans::new(), false)
    }

    fn assemble(
        start: usize,
        pattern: usize,
        path: Vec<Frame<'p>>,
        spans: Spans,
        atomic: BTreeSet<String>,
        complete: bool,
    ) -> Substate<'p> {
        // Bindings are deliberately left out: two threads at the same place
        // in the same attempt are merged, and the first one kept.
        let hash = path
            .iter()
            .map(Frame::hash)
            .fold(0, mix_pair)
            ^ (start as u64).rotate_left(22);
        let hash = mix_pair(hash, pattern as u64);

        Substate {
            start,
            pattern,
            path,
            spans,
            atomic,
            complete,
            hash,
        }
    }

    fn current(&self) -> Option<&'p Node> {
        self.path
            .last()
            .and_then(Frame::current)
    }

    /// Is the active instruction one that consumes an input node?
    pub fn awaits_input(&self) -> bool {
        self.current()
            .map(|node| {
                node.kind()
                    .is_value_pattern()
            })
            .unwrap_or(false)
    }

    /// Advance this substate. With `input` of None only zero-width
    /// instructions make progress; a consuming instruction returns the
    /// substate unchanged. `index` is the position in the input stream and
    /// `at_end` is true only once the input is exhausted.
    pub fn step(&self, input: Option<&Node>, index: usize, at_end: bool) -> Vec<Substate<'p>> {
        let Some(top) = self.path.last() else {
            return vec![];
        };

        match top.current() {
            None => self.exit_group(top.node, index),
            Some(instruction) => self.execute(instruction, input, index, at_end),
        }
    }

    fn exit_group(&self, group: &'p Node, index: usize) -> Vec<Substate<'p>> {
        if self.path.len() == 1 {
            return vec![self.to_completed()];
        }

        match group.kind() {
            Kind::PatternOptional | Kind::PatternSequence | Kind::PatternAlternatives => {
                vec![self.to_left()]
            }
            Kind::PatternRepeat => {
                if is_greedy(group) {
                    vec![self.to_looped(), self.to_left()]
                } else {
                    vec![self.to_left(), self.to_looped()]
                }
            }
            Kind::PatternCapture => {
                let mut left = self.to_left();
                let name = capture_name(group);
                if let Some(span) = left
                    .spans
                    .get_mut(name)
                {
                    span.1 = Some(index);
                }
                vec![left.rehashed()]
            }
            Kind::PatternAnchor | Kind::PatternMatchType | Kind::PatternMatchValue => {
                panic!("atomic pattern instruction {} reached a compound exit", group.kind())
            }
            other => panic!("non-pattern node {} in pattern at {}", other, group.location()),
        }
    }

    fn execute(
        &self,
        instruction: &'p Node,
        input: Option<&Node>,
        index: usize,
        at_end: bool,
    ) -> Vec<Substate<'p>> {
        match instruction.kind() {
            Kind::PatternOptional => {
                if is_greedy(instruction) {
                    vec![self.to_entered(instruction, 0), self.to_next()]
                } else {
                    vec![self.to_next(), self.to_entered(instruction, 0)]
                }
            }
            Kind::PatternSequence | Kind::PatternRepeat => {
                vec![self.to_entered(instruction, 0)]
            }
            Kind::PatternAlternatives => (0..instruction
                .children()
                .len())
                .map(|i| self.to_entered(instruction, i))
                .collect(),
            Kind::PatternAnchor => {
                let satisfied = match instruction
                    .value()
                    .as_flag()
                {
                    Some(true) => index == 0,
                    Some(false) => at_end,
                    None => panic!("anchor without a start/end flag at {}", instruction.location()),
                };
                if satisfied {
                    vec![self.to_next()]
                } else {
                    vec![]
                }
            }
            Kind::PatternCapture => {
                let name = capture_name(instruction);
                let atomic = instruction
                    .children()
                    .len()
                    == 2
                    && instruction.children()[1]
                        .kind()
                        .is_value_pattern();

                let mut entered = self.to_entered(instruction, 1);
                entered
                    .spans
                    .insert(name.to_string(), (index, None));
                if atomic {
                    entered
                        .atomic
                        .insert(name.to_string());
                } else {
                    entered
                        .atomic
                        .remove(name);
                }
                vec![entered]
            }
            Kind::PatternMatchValue => {
                let Some(input) = input else {
                    return vec![self.clone()];
                };
                let Some(target) = instruction
                    .children()
                    .first()
                else {
                    panic!("match-value pattern without a target at {}", instruction.location())
                };
                if input.kind() == target.kind()
                    && input
                        .hash()
                        .is_some()
                    && input.hash() == target.hash()
                {
                    vec![self.to_next()]
                } else {
                    vec![]
                }
            }
            Kind::PatternMatchType => {
                let Some(input) = input else {
                    return vec![self.clone()];
                };
                if Some(input.kind())
                    == instruction
                        .value()
                        .as_kind()
                {
                    vec![self.to_next()]
                } else {
                    vec![]
                }
            }
            other => panic!(
                "non-pattern node {} in pattern at {}",
                other,
                instruction.location()
            ),
        }
    }

    fn rebuilt(&self, path: Vec<Frame<'p>>) -> Substate<'p> {
        Substate::assemble(
            self.start,
            self.pattern,
            path,
            self.spans
                .clone(),
            self.atomic
                .clone(),
            false,
        )
    }

    fn rehashed(self) -> Substate<'p> {
        Substate::assemble(
            self.start,
            self.pattern,
            self.path,
            self.spans,
            self.atomic,
            self.complete,
        )
    }

    /// Move past the active instruction. Finishing any one branch of an
    /// alternatives group finishes the whole group.
    fn to_next(&self) -> Substate<'p> {
        let mut path = self
            .path
            .clone();
        advance(&mut path);
        self.rebuilt(path)
    }

    /// Pop the current group and move past it in its parent.
    fn to_left(&self) -> Substate<'p> {
        let mut path = self
            .path
            .clone();
        path.pop();
        advance(&mut path);
        self.rebuilt(path)
    }

    /// Go round a repeat group again.
    fn to_looped(&self) -> Substate<'p> {
        let mut path = self
            .path
            .clone();
        if let Some(top) = path.last_mut() {
            top.index = 0;
        }
        self.rebuilt(path)
    }

    fn to_entered(&self, group: &'p Node, index: usize) -> Substate<'p> {
        let mut path = self
            .path
            .clone();
        path.push(Frame::new(group, index));
        self.rebuilt(path)
    }

    fn to_completed(&self) -> Substate<'p> {
        Substate::assemble(
            self.start,
            self.pattern,
            vec![],
            self.spans
                .clone(),
            self.atomic
                .clone(),
            true,
        )
    }
}

fn advance(path: &mut [Frame<'_>]) {
    if let Some(top) = path.last_mut() {
        if top.node.kind() == Kind::PatternAlternatives {
            top.index = top
                .node
                .children()
                .len();
        } else {
            top.index += 1;
        }
    }
}

fn is_greedy(node: &Node) -> bool {
    node.value()
        .as_flag()
        .unwrap_or(true)
}

fn capture_name(capture: &Node) -> &str {
    let Some(name) = capture
        .children()
        .first()
    else {
        panic!("capture without a name at {}", capture.location())
    };
    name.symbol_name()
        .unwrap_or_else(|error| panic!("malformed capture: {}", error))
}
