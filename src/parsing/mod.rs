//! Tokenizer and block parser for Backolon source

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, Node};

mod blocks;
mod error;
mod grammar;
mod tokenizer;

pub use blocks::{BlockRule, Finish, Grammar};
pub use error::{Note, ParsingError};
pub use tokenizer::tokenize;

/// Read a file and return an owned String. A filename of "-" reads
/// standard input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    let result = if filename.to_str() == Some("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(filename)
    };

    match result {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a toplevel block Node using the default grammar.
pub fn parse(content: &str, filename: &str) -> Result<Node, ParsingError> {
    parse_with(&Grammar::default(), content, filename)
}

/// Parse text with a caller-supplied grammar.
pub fn parse_with(grammar: &Grammar, content: &str, filename: &str) -> Result<Node, ParsingError> {
    let tokens = tokenize(content, filename);

    match grammar.parse(&tokens) {
        Ok(node) => {
            let count = node
                .children()
                .len();
            debug!(
                "Parsed {} into {} top-level node{}",
                filename,
                count,
                if count == 1 { "" } else { "s" }
            );
            Ok(node)
        }
        Err(error) => {
            debug!("error: {}", error);
            Err(error)
        }
    }
}
