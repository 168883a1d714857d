//! Front end for the Backolon language: a homoiconic Node model, a
//! tokenizer, a table-driven block parser, and a pattern-matching engine
//! that runs over sequences of Nodes.

pub mod collections;
pub mod formatting;
pub mod language;
pub mod parsing;
pub mod patterns;
pub mod problem;
pub mod runtime;
