use crate::formatting::{Highlight, Syntax};
use crate::language::{LoadingError, Location};

use super::messages::Diagnostic;

/// Format a diagnostic with full details, including an excerpt of the
/// offending line from `source`, any notes, and the chain of causes.
pub fn full_details(diagnostic: &Diagnostic, source: &str, highlighter: &dyn Highlight) -> String {
    let location = &diagnostic.location;

    let mut result = format!(
        "{}: {} {}\n\n{}\n\n{}",
        highlighter.style(Syntax::Error, "error"),
        position(location),
        highlighter.style(Syntax::Emphasis, &diagnostic.problem),
        excerpt(location, source, highlighter),
        diagnostic.details
    );

    for note in &diagnostic.notes {
        result.push_str(&format!("\n\n{} {}", position(&note.location), note.message));
        if note.location.file == location.file {
            result.push_str("\n\n");
            result.push_str(&excerpt(&note.location, source, highlighter));
        }
    }

    for (message, cause) in causes(location) {
        result.push_str(&format!("\n\ncaused by: {} at {}", message, position(cause)));
    }

    result
}

/// Format a diagnostic as a single line.
pub fn concise_details(diagnostic: &Diagnostic, highlighter: &dyn Highlight) -> String {
    format!(
        "{}: {} {}",
        highlighter.style(Syntax::Error, "error"),
        position(&diagnostic.location),
        highlighter.style(Syntax::Emphasis, &diagnostic.problem),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError<'_>, highlighter: &dyn Highlight) -> String {
    format!(
        "{}: {}: {}",
        highlighter.style(Syntax::Error, "error"),
        error
            .filename
            .display(),
        highlighter.style(Syntax::Emphasis, &error.problem)
    )
}

fn position(location: &Location) -> String {
    format!(
        "{}:{}:{}",
        location.file,
        location.line + 1,
        location.column + 1
    )
}

fn excerpt(location: &Location, source: &str, highlighter: &dyn Highlight) -> String {
    let code = source
        .lines()
        .nth(location.line)
        .unwrap_or("?");
    let line = location.line + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );
    let gutter = highlighter.style(Syntax::Gutter, "|");

    format!(
        "{:width$} {}\n{} {} {}\n{:width$} {} {}{}",
        ' ',
        gutter,
        highlighter.style(Syntax::Gutter, &format!("{:>width$}", line)),
        gutter,
        code,
        ' ',
        gutter,
        " ".repeat(location.column),
        highlighter.style(Syntax::Caret, "^"),
    )
}

fn causes(location: &Location) -> Vec<(&str, &Location)> {
    let mut result = vec![];
    let mut current = location;
    while let Some(cause) = &current.cause {
        result.push((cause.message.as_str(), &cause.location));
        current = &cause.location;
    }
    result
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::formatting::Identity;
    use crate::parsing::parse;

    #[test]
    fn full_details_points_at_the_problem() {
        let source = "a b\n  (c d";
        let error = parse(source, "broken.bk").unwrap_err();
        let diagnostic = Diagnostic::from(&error);

        let text = full_details(&diagnostic, source, &Identity);
        let lines: Vec<&str> = text
            .lines()
            .collect();
        assert_eq!(lines[0], "error: broken.bk:2:3 \"(\" was never closed");
        assert_eq!(lines[2], "    |");
        assert_eq!(lines[3], "  2 |   (c d");
        assert_eq!(lines[4], "    |   ^");
        assert!(text.contains("still open when the input ran out"));
    }

    #[test]
    fn concise_is_one_line() {
        let source = "\"abc";
        let error = parse(source, "quote.bk").unwrap_err();
        let text = concise_details(&Diagnostic::from(&error), &Identity);
        assert_eq!(text, "error: quote.bk:1:1 \"\\\"\" was never closed");
    }

    #[test]
    fn notes_and_causes_are_listed() {
        let origin = Location::new("a.bk", 4, 0);
        let location = Location::new("a.bk", 0, 2).caused_by("called from", origin);
        let diagnostic = Diagnostic {
            problem: "expected brace".to_string(),
            details: "details".to_string(),
            location,
            notes: vec![crate::parsing::Note {
                message: "note: here".to_string(),
                location: Location::new("b.bk", 1, 1),
            }],
        };

        let text = full_details(&diagnostic, "xyz", &Identity);
        assert!(text.contains("b.bk:2:2 note: here"));
        assert!(text.ends_with("caused by: called from at a.bk:5:1"));
    }
}
