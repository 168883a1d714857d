//! Runtime collection values built out of Nodes

mod map;

pub use map::*;
