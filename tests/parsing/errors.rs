#[cfg(test)]
mod syntax {
    use backolon::parsing::{parse, ParsingError};

    /// Helper function to check if parsing produces the expected error type
    fn expect_error(content: &str, expected: ParsingError) -> ParsingError {
        match parse(content, "test.bk") {
            Ok(tree) => panic!(
                "Expected parsing to fail, but it succeeded for input: {}\n{:?}",
                content, tree
            ),
            Err(error) => {
                if std::mem::discriminant(&error) != std::mem::discriminant(&expected) {
                    panic!(
                        "Expected error type like {:?} but got: {:?} for input '{}'",
                        expected, error, content
                    );
                }
                error
            }
        }
    }

    fn somewhere() -> backolon::language::Location {
        backolon::language::Location::unknown()
    }

    #[test]
    fn unclosed_round() {
        let error = expect_error("(a b", ParsingError::Unclosed(somewhere(), String::new()));
        assert_eq!(error.message(), "\"(\" was never closed");
        assert_eq!(
            error
                .location()
                .column,
            0
        );
    }

    #[test]
    fn mismatched_closer() {
        let error = expect_error("[a)", ParsingError::Unclosed(somewhere(), String::new()));
        assert_eq!(error.message(), "\"[\" was never closed");
    }

    #[test]
    fn unclosed_comment() {
        let error = expect_error(
            "x ## never ends",
            ParsingError::Unclosed(somewhere(), String::new()),
        );
        assert_eq!(error.message(), "\"##\" was never closed");
        assert_eq!(
            error
                .location()
                .column,
            2
        );
    }

    #[test]
    fn unclosed_string() {
        let error = expect_error(
            "\"abc\n\ndef",
            ParsingError::Unclosed(somewhere(), String::new()),
        );
        assert_eq!(error.message(), "\"\\\"\" was never closed");
        assert_eq!(
            error
                .location()
                .line,
            0
        );
    }

    #[test]
    fn unclosed_unicode_escape() {
        // the brace opens an interpolation which swallows the closing quote
        // as the start of another string
        let error = expect_error(
            r#""\u{""#,
            ParsingError::Unclosed(somewhere(), String::new()),
        );
        assert_eq!(error.message(), "\"\\\"\" was never closed");
        assert_eq!(
            error
                .location()
                .column,
            4
        );
    }

    #[test]
    fn unknown_escape() {
        expect_error(r#""\q""#, ParsingError::UnknownEscape(somewhere()));
    }

    #[test]
    fn short_hex_escape() {
        expect_error(r#""\x4""#, ParsingError::InvalidEscape(somewhere()));
    }

    #[test]
    fn escaped_number() {
        expect_error(r#""\1""#, ParsingError::InvalidEscape(somewhere()));
    }

    #[test]
    fn escape_out_of_range() {
        let error = expect_error(
            r#""\u{110000}""#,
            ParsingError::EscapeOutOfRange(somewhere()),
        );
        assert_eq!(error.message(), "escape out of range");
    }

    #[test]
    fn missing_brace() {
        let error = expect_error(
            r#"x "\u""#,
            ParsingError::ExpectedBrace(somewhere(), String::new(), somewhere()),
        );
        assert_eq!(error.message(), "expected \"{\" after \"\\u\"");

        let notes = error.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(
            notes[0]
                .location
                .column,
            2
        );
        assert!(notes[0]
            .message
            .contains("raw string"));
    }

    #[test]
    fn errors_display_with_position() {
        let error = parse("\n  (", "where.bk").unwrap_err();
        assert_eq!(
            error.to_string(),
            "where.bk:2:3: error: \"(\" was never closed"
        );
    }
}
