#[cfg(test)]
mod verify {
    use backolon::formatting::unparse;
    use backolon::language::*;
    use backolon::parsing::parse;

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    fn kinds(node: &Node) -> Vec<Kind> {
        node.children()
            .iter()
            .map(Node::kind)
            .collect()
    }

    #[test]
    fn nested_brackets() {
        let tree = parse("([{}])", "test.bk").unwrap();
        assert_eq!(tree.kind(), Kind::ToplevelBlock);
        assert_eq!(kinds(&tree), vec![Kind::RoundBlock]);

        let round = &tree.children()[0];
        assert_eq!(kinds(round), vec![Kind::SquareBlock]);
        let square = &round.children()[0];
        assert_eq!(kinds(square), vec![Kind::CurlyBlock]);
        assert!(square.children()[0]
            .children()
            .is_empty());

        assert_eq!(round.prefix(), "(");
        assert_eq!(round.suffix(), ")");
        assert_eq!(unparse(&tree), "([{}])");
    }

    #[test]
    fn blocks_among_symbols() {
        let tree = parse("a (b c) d", "test.bk").unwrap();
        assert_eq!(
            kinds(&tree),
            vec![
                Kind::NameSymbol,
                Kind::SpaceSymbol,
                Kind::RoundBlock,
                Kind::SpaceSymbol,
                Kind::NameSymbol
            ]
        );
        assert_eq!(
            kinds(&tree.children()[2]),
            vec![Kind::NameSymbol, Kind::SpaceSymbol, Kind::NameSymbol]
        );
    }

    #[test]
    fn block_locations() {
        let tree = parse("x\n  (y)", "test.bk").unwrap();
        let round = &tree.children()[3];
        assert_eq!(round.kind(), Kind::RoundBlock);
        assert_eq!(
            round
                .location()
                .line,
            1
        );
        assert_eq!(
            round
                .location()
                .column,
            2
        );
        assert_eq!(
            &*round
                .location()
                .file,
            "test.bk"
        );
    }

    #[test]
    fn plain_strings() {
        let tree = parse(r#""hello\nworld""#, "test.bk").unwrap();
        let string = &tree.children()[0];
        assert_eq!(string.kind(), Kind::String);
        assert_eq!(
            string
                .value()
                .as_text(),
            Some("hello\nworld")
        );
        assert_eq!(unparse(&tree), r#""hello\nworld""#);
    }

    #[test]
    fn escaped_quotes_stay_inside() {
        let tree = parse(r#""say \"hi\"" x"#, "test.bk").unwrap();
        assert_eq!(
            tree.children()[0]
                .value()
                .as_text(),
            Some("say \"hi\"")
        );
        assert_eq!(
            kinds(&tree),
            vec![Kind::String, Kind::SpaceSymbol, Kind::NameSymbol]
        );
    }

    #[test]
    fn interpolated_strings() {
        let tree = parse(r#""a{b}c""#, "test.bk").unwrap();
        let string = &tree.children()[0];
        assert_eq!(string.kind(), Kind::StringBlock);
        assert_eq!(
            kinds(string),
            vec![Kind::String, Kind::RoundBlock, Kind::String]
        );
        assert_eq!(
            string.children()[2]
                .value()
                .as_text(),
            Some("c")
        );
        assert_eq!(unparse(&tree), r#""a{b}c""#);
    }

    #[test]
    fn unicode_escapes() {
        let tree = parse(r#""\u{48}i é""#, "test.bk").unwrap();
        let string = &tree.children()[0];
        assert_eq!(string.kind(), Kind::String);
        assert_eq!(
            string
                .value()
                .as_text(),
            Some("Hi é")
        );
        assert_eq!(unparse(&tree), r#""\u{48}i é""#);
    }

    #[test]
    fn raw_strings() {
        let tree = parse(r#"'it\'s \n {raw}'"#, "test.bk").unwrap();
        let string = &tree.children()[0];
        assert_eq!(string.kind(), Kind::String);
        assert_eq!(
            string
                .value()
                .as_text(),
            Some("it's \\n {raw}")
        );
        assert_eq!(unparse(&tree), r#"'it\'s \n {raw}'"#);
    }

    #[test]
    fn block_comments() {
        let tree = parse("a ## note ## b", "test.bk").unwrap();
        assert_eq!(
            kinds(&tree),
            vec![
                Kind::NameSymbol,
                Kind::SpaceSymbol,
                Kind::SpaceSymbol,
                Kind::SpaceSymbol,
                Kind::NameSymbol
            ]
        );
        assert_eq!(tree.children()[2].prefix(), "## note ##");
    }

    #[test]
    fn line_comments() {
        let tree = parse("x # hi (\ny", "test.bk").unwrap();
        assert_eq!(
            kinds(&tree),
            vec![
                Kind::NameSymbol,
                Kind::SpaceSymbol,
                Kind::SpaceSymbol,
                Kind::NameSymbol
            ]
        );
        assert_eq!(tree.children()[2].prefix(), "# hi (\n");

        let tree = parse("x # to the end", "test.bk").unwrap();
        assert_eq!(tree.children()[2].prefix(), "# to the end");
    }

    #[test]
    fn numbers() {
        let tree = parse("0x1F 2.5e3 0b11 .5", "test.bk").unwrap();
        let values: Vec<f64> = tree
            .children()
            .iter()
            .filter(|node| node.kind() == Kind::Number)
            .filter_map(|node| {
                node.value()
                    .as_number()
            })
            .collect();
        assert_eq!(values, vec![31.0, 2500.0, 3.0, 0.5]);
    }

    #[test]
    fn round_trip() {
        let source = trim(
            r#"
## demo ##
total = sum[1, 2.5, 0x10]
greet = { name -> "hello, {name}!" }
# done
            "#,
        );
        let tree = parse(source, "demo.bk").unwrap();
        assert_eq!(unparse(&tree), source);
    }

    #[test]
    fn structure_ignores_location() {
        let one = parse("f(x)", "one.bk").unwrap();
        let two = parse("f(x)", "two.bk").unwrap();
        assert!(one.same_structure(&two));
        assert_eq!(one.hash(), two.hash());

        let three = parse("f(y)", "one.bk").unwrap();
        assert!(!one.same_structure(&three));
        assert_ne!(one.hash(), three.hash());
    }
}
