use crate::language::{Location, RuntimeError};
use crate::parsing::{Note, ParsingError};

/// An error ready to be shown to a person: a one-line problem, a longer
/// explanation, where it happened, and any secondary locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub problem: String,
    pub details: String,
    pub location: Location,
    pub notes: Vec<Note>,
}

impl From<&ParsingError> for Diagnostic {
    fn from(error: &ParsingError) -> Diagnostic {
        let details = match error {
            ParsingError::Unclosed(_, opener) if opener.is_empty() => {
                "The input ended before the top level was complete.".to_string()
            }
            ParsingError::Unclosed(_, opener) => format!(
                r#"
The block opened here with {:?} was still open when the input ran out.
Add the matching closing delimiter, or escape the opener if it was meant
literally.
                "#,
                opener
            )
            .trim_ascii()
            .to_string(),
            ParsingError::UnknownEscape(_) => r#"
The recognized escapes are \a \b \e \f \n \r \t \v \z \" \' \\ as well as
\xNN for a byte value and \u{...} for a Unicode code point.
            "#
            .trim_ascii()
            .to_string(),
            ParsingError::InvalidEscape(_) => r#"
This escape sequence is incomplete or has the wrong shape. \x needs exactly
two hexadecimal digits; \u must be followed by a braced code point.
            "#
            .trim_ascii()
            .to_string(),
            ParsingError::EscapeOutOfRange(_) => r#"
The value given is not a Unicode scalar value. Code points must be at most
10FFFF and outside the surrogate range D800 to DFFF.
            "#
            .trim_ascii()
            .to_string(),
            ParsingError::ExpectedBrace(_, after, _) => format!(
                "The \\{} escape takes its code point in braces, as in \\{}{{1F600}}.",
                after, after
            ),
            ParsingError::UnknownRule(_, name) => format!(
                "The grammar nests a block rule called {:?} but never defines it.",
                name
            ),
        };

        Diagnostic {
            problem: error.message(),
            details,
            location: error
                .location()
                .clone(),
            notes: error.notes(),
        }
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(error: &RuntimeError) -> Diagnostic {
        let details = match error {
            RuntimeError::ExpectedSymbol(_) => {
                "A name, operator, or space was needed here.".to_string()
            }
            RuntimeError::NotAMap(_, _) => {
                "This operation only works on map values, written [key: value].".to_string()
            }
            RuntimeError::Unhashable(_) => r#"
Map keys must have a structural hash. Maps themselves, and anything
containing a map, cannot be used as keys.
            "#
            .trim_ascii()
            .to_string(),
            RuntimeError::TaskInUse(_) => {
                "A task runs one tree at a time; wait for it to complete first.".to_string()
            }
        };

        Diagnostic {
            problem: error.message(),
            details,
            location: error
                .location()
                .clone(),
            notes: vec![],
        }
    }
}
