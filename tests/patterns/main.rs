use std::ops::Range;

use backolon::language::{Kind, Location, Node};
use backolon::parsing::parse;
use backolon::patterns::build::*;
use backolon::patterns::{best_match, match_patterns, Binding, MatchResult, Matcher, MatchingError};

fn number(n: f64) -> Node {
    Node::number(n, n.to_string(), Location::unknown())
}

fn name(text: &str) -> Node {
    Node::name(text, Location::unknown())
}

fn spans<T>(results: &[MatchResult<'_, T>]) -> Vec<Range<usize>> {
    results
        .iter()
        .map(|result| {
            result
                .span
                .clone()
        })
        .collect()
}

#[test]
fn empty_sequence_matches_at_every_offset() {
    let source: Vec<Node> = (0..1000)
        .map(|n| number(n as f64))
        .collect();
    let results = match_patterns(&source, &[(sequence(vec![]), ())]);
    assert_eq!(
        spans(&results),
        (0..1000)
            .map(|i| i..i)
            .collect::<Vec<_>>()
    );
}

#[test]
fn basic_sequence() {
    let source: Vec<Node> = (0..200)
        .map(|n| number(n as f64))
        .collect();
    let pattern = sequence(
        (10..100)
            .map(|n| match_value(number(n as f64)))
            .collect(),
    );
    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(spans(&results), vec![10..100]);
}

fn repeat_spans(greedy: bool) -> Vec<Range<usize>> {
    let source: Vec<Node> = (0..300)
        .map(|_| number(0.0))
        .collect();
    let pattern = sequence(vec![repeat(vec![match_value(number(0.0))], greedy)]);
    let mut found = spans(&match_patterns(&source, &[(pattern, ())]));
    found.sort_by_key(|span| (span.start, span.end));
    found
}

#[test]
fn repeat_finds_every_run() {
    let expected: Vec<Range<usize>> = (0..300)
        .flat_map(|start| (start + 1..=300).map(move |end| start..end))
        .collect();

    assert_eq!(repeat_spans(true), expected);
    assert_eq!(repeat_spans(false), expected);
}

#[test]
fn captures_bind_single_nodes() {
    let source = vec![
        number(2.0),
        name("bye"),
        number(1.0),
        number(7.0),
        number(0.0),
        name("hi2"),
        number(1.0),
        number(4.0),
        number(2.0),
        number(0.0),
        name("hi3"),
        number(1.0),
    ];
    let pattern = sequence(vec![
        match_value(number(0.0)),
        capture("foo", match_type(Kind::NameSymbol)),
        match_value(number(1.0)),
    ]);

    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(spans(&results), vec![4..7, 9..12]);
    assert_eq!(results[0].bindings["foo"], Binding::One(&source[5]));
    assert_eq!(results[1].bindings["foo"], Binding::One(&source[10]));
}

#[test]
fn captures_bind_spans() {
    let source = vec![name("f"), number(1.0), number(2.0), name("g")];
    let pattern = sequence(vec![
        match_type(Kind::NameSymbol),
        capture("args", repeat(vec![match_type(Kind::Number)], true)),
        match_type(Kind::NameSymbol),
    ]);

    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(spans(&results), vec![0..4]);
    assert_eq!(results[0].bindings["args"], Binding::Many(&source[1..3]));
}

#[test]
fn anchors_pin_matches() {
    let source = vec![number(1.0), number(2.0), number(3.0)];

    let start = sequence(vec![anchor(true), match_type(Kind::Number)]);
    assert_eq!(spans(&match_patterns(&source, &[(start, ())])), vec![0..1]);

    let end = sequence(vec![match_type(Kind::Number), anchor(false)]);
    assert_eq!(spans(&match_patterns(&source, &[(end, ())])), vec![2..3]);

    let both = sequence(vec![
        anchor(true),
        repeat(vec![match_type(Kind::Number)], true),
        anchor(false),
    ]);
    assert_eq!(spans(&match_patterns(&source, &[(both, ())])), vec![0..3]);
}

#[test]
fn alternatives_try_each_branch() {
    let source = vec![name("a"), name("b"), name("c"), name("a")];
    let pattern = alternatives(vec![
        match_value(name("a")),
        sequence(vec![match_value(name("b")), match_value(name("c"))]),
    ]);
    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(spans(&results), vec![0..1, 1..3, 3..4]);
}

#[test]
fn optional_parts() {
    let source = vec![name("a"), name("c"), name("a"), name("b"), name("c")];
    let pattern = sequence(vec![
        match_value(name("a")),
        optional(vec![match_value(name("b"))], true),
        match_value(name("c")),
    ]);
    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(spans(&results), vec![0..2, 2..5]);
}

#[test]
fn several_patterns_at_once() {
    let source = vec![name("x"), number(1.0), name("y")];
    let patterns = [
        (match_type(Kind::NameSymbol), "name"),
        (match_type(Kind::Number), "number"),
    ];
    let results = match_patterns(&source, &patterns);
    let found: Vec<(&str, Range<usize>)> = results
        .iter()
        .map(|result| {
            (
                result.payload,
                result
                    .span
                    .clone(),
            )
        })
        .collect();
    assert_eq!(
        found,
        vec![("name", 0..1), ("number", 1..2), ("name", 2..3)]
    );
}

#[test]
fn matching_over_parsed_source() {
    let tree = parse("x = 1 + 2", "sum.bk").unwrap();
    let space = optional(vec![match_type(Kind::SpaceSymbol)], true);
    let pattern = sequence(vec![
        capture("lhs", match_type(Kind::Number)),
        space.clone(),
        match_value(Node::operator("+", Location::unknown())),
        space,
        capture("rhs", match_type(Kind::Number)),
    ]);

    let results = match_patterns(tree.children(), &[(pattern, "add")]);
    let best = best_match(&results).expect("a match");
    assert_eq!(best.span, 4..9);
    assert_eq!(best.payload, "add");

    match (&best.bindings["lhs"], &best.bindings["rhs"]) {
        (Binding::One(lhs), Binding::One(rhs)) => {
            assert_eq!(
                lhs.value()
                    .as_number(),
                Some(1.0)
            );
            assert_eq!(
                rhs.value()
                    .as_number(),
                Some(2.0)
            );
        }
        other => panic!("unexpected bindings {:?}", other),
    }
}

#[test]
fn best_match_prefers_longest_at_earliest_start() {
    let source = vec![name("a"), name("a"), name("a")];
    let pattern = repeat(vec![match_value(name("a"))], false);
    let results = match_patterns(&source, &[(pattern, ())]);
    assert_eq!(results.len(), 6);
    assert_eq!(
        best_match(&results).map(|result| result.span.clone()),
        Some(0..3)
    );
}

#[test]
fn budget_bounds_live_states() {
    let source: Vec<Node> = (0..500)
        .map(|_| number(0.0))
        .collect();
    let pattern = repeat(vec![match_type(Kind::Number)], true);

    let error = Matcher::with_budget(50)
        .run(&source, &[(pattern.clone(), ())])
        .unwrap_err();
    assert_eq!(
        error,
        MatchingError::BudgetExceeded {
            offset: 50,
            states: 51
        }
    );

    let results = Matcher::new()
        .run(&source[..10], &[(pattern, ())])
        .unwrap();
    assert_eq!(results.len(), 55);
}
