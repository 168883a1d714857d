//! Matching pattern trees against sequences of Nodes.
//!
//! Every pattern is tried at every offset of the input at once, as a set of
//! lightweight threads ("substates") stepped in lockstep over the input.
//! Threads that reach the same place in the same attempt are merged, which
//! keeps the work bounded by the size of the patterns rather than by the
//! number of ways they could match.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};

use crate::language::{Kind, Node};

pub mod build;
mod substate;

use substate::Substate;

/// What a capture group matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding<'s> {
    /// The capture wrapped a single-node instruction.
    One(&'s Node),
    /// Anything else: the span of input the group covered, possibly empty.
    Many(&'s [Node]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'s, T> {
    pub payload: T,
    pub bindings: BTreeMap<String, Binding<'s>>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    BudgetExceeded { offset: usize, states: usize },
}

impl fmt::Display for MatchingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingError::BudgetExceeded { offset, states } => write!(
                f,
                "pattern matching gave up at offset {} with {} live states",
                offset, states
            ),
        }
    }
}

impl std::error::Error for MatchingError {}

/// Limit on how many live substates a match may hold after any step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub max_states: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    budget: Option<Budget>,
}

impl Matcher {
    pub fn new() -> Matcher {
        Matcher::default()
    }

    pub fn with_budget(max_states: usize) -> Matcher {
        Matcher {
            budget: Some(Budget { max_states }),
        }
    }

    /// Find every (pattern, start, end) match over `source`, in the order
    /// the automaton completes them. Each pattern carries a payload that is
    /// copied into its results.
    pub fn run<'s, T: Clone>(
        &self,
        source: &'s [Node],
        patterns: &[(Node, T)],
    ) -> Result<Vec<MatchResult<'s, T>>, MatchingError> {
        // The root's children are run as a sequence, so anything that is not
        // already a sequence gets wrapped in one.
        let wrapped: Vec<Option<Node>> = patterns
            .iter()
            .map(|(pattern, _)| match pattern.kind() {
                Kind::PatternSequence => None,
                _ => Some(build::sequence(vec![pattern.clone()])),
            })
            .collect();
        let roots: Vec<&Node> = patterns
            .iter()
            .zip(&wrapped)
            .map(|((pattern, _), wrapper)| {
                wrapper
                    .as_ref()
                    .unwrap_or(pattern)
            })
            .collect();

        let mut simulation = Simulation {
            source,
            patterns,
            roots: &roots,
            waiting: VecDeque::new(),
            progress: VecDeque::new(),
            results: Vec::new(),
            peak: 0,
        };
        simulation.run(self.budget)?;

        debug!(
            "Matched {} pattern{} over {} nodes: {} result{}, at most {} live states",
            patterns.len(),
            if patterns.len() == 1 { "" } else { "s" },
            source.len(),
            simulation
                .results
                .len(),
            if simulation
                .results
                .len()
                == 1
            {
                ""
            } else {
                "s"
            },
            simulation.peak
        );

        Ok(simulation.results)
    }
}

/// Find every match of every pattern over `source`, with no limit on the
/// work done.
pub fn match_patterns<'s, T: Clone>(
    source: &'s [Node],
    patterns: &[(Node, T)],
) -> Vec<MatchResult<'s, T>> {
    match Matcher::new().run(source, patterns) {
        Ok(results) => results,
        Err(_) => unreachable!("unbudgeted matching cannot exceed a budget"),
    }
}

/// The match starting earliest, and of those the longest. Ties beyond that
/// go to whichever was found first.
pub fn best_match<'r, 's, T>(results: &'r [MatchResult<'s, T>]) -> Option<&'r MatchResult<'s, T>> {
    results
        .iter()
        .min_by_key(|result| {
            (
                result
                    .span
                    .start,
                std::cmp::Reverse(
                    result
                        .span
                        .len(),
                ),
            )
        })
}

struct Simulation<'p, 's, T> {
    source: &'s [Node],
    patterns: &'p [(Node, T)],
    roots: &'p [&'p Node],
    /// threads that need the next input node
    waiting: VecDeque<Substate<'p>>,
    /// threads to be stepped in the current pass
    progress: VecDeque<Substate<'p>>,
    results: Vec<MatchResult<'s, T>>,
    peak: usize,
}

impl<'p, 's, T: Clone> Simulation<'p, 's, T> {
    fn run(&mut self, budget: Option<Budget>) -> Result<(), MatchingError> {
        let source = self.source;
        let roots = self.roots;

        for (index, input) in source
            .iter()
            .enumerate()
        {
            for (pattern, root) in roots
                .iter()
                .enumerate()
            {
                self.progress
                    .push_back(Substate::seed(index, pattern, root));
            }

            self.pass(index, None, false);
            self.pass(index, Some(input), false);

            let live = self
                .progress
                .len();
            self.peak = self
                .peak
                .max(live);
            trace!(index, live);

            if let Some(budget) = budget {
                if live > budget.max_states {
                    return Err(MatchingError::BudgetExceeded {
                        offset: index,
                        states: live,
                    });
                }
            }
        }

        self.pass(source.len(), None, true);
        Ok(())
    }

    /// Step everything in `progress`. Without input, zero-width successors
    /// are stepped again in the same pass, ahead of older threads so that
    /// priority order is kept; threads waiting on input are parked. With
    /// input, every survivor is parked for the next position. Either way
    /// the parked threads become `progress` afterwards.
    fn pass(&mut self, index: usize, input: Option<&Node>, at_end: bool) {
        let mut parked = HashSet::new();
        let mut seen = HashSet::new();

        while let Some(state) = self
            .progress
            .pop_front()
        {
            if input.is_none() && state.awaits_input() {
                if parked.insert(state.hash) {
                    self.waiting
                        .push_back(state);
                }
                continue;
            }

            let mut front = 0;
            for next in state.step(input, index, at_end) {
                if next.complete {
                    self.emit(next, index);
                } else if input.is_some() {
                    if parked.insert(next.hash) {
                        self.waiting
                            .push_back(next);
                    }
                } else if seen.insert(next.hash) {
                    self.progress
                        .insert(front, next);
                    front += 1;
                }
            }
        }

        std::mem::swap(&mut self.waiting, &mut self.progress);
    }

    fn emit(&mut self, state: Substate<'p>, index: usize) {
        let source = self.source;
        let mut bindings = BTreeMap::new();

        for (name, (start, end)) in &state.spans {
            let binding = if state
                .atomic
                .contains(name)
            {
                match source.get(*start) {
                    Some(node) => Binding::One(node),
                    None => continue,
                }
            } else {
                let end = end.unwrap_or(*start);
                match source.get(*start..end) {
                    Some(nodes) => Binding::Many(nodes),
                    None => continue,
                }
            };
            bindings.insert(name.clone(), binding);
        }

        self.results
            .push(MatchResult {
                payload: self.patterns[state.pattern]
                    .1
                    .clone(),
                bindings,
                span: state.start..index,
            });
    }
}
