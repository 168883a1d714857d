use std::io::IsTerminal;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, Level};

use backolon::formatting::{render, unparse, Highlight, Highlighted, Identity, Terminal};
use backolon::language::Node;
use backolon::parsing::{self, tokenize};
use backolon::problem::{concise_loading_error, full_details, Diagnostic};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("backolon")
        .version(VERSION)
        .propagate_version(true)
        .about("Tools for the Backolon language.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log what the tokenizer, parser, and matcher are doing to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given file and report any syntax errors")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the code to check, or - for standard input."),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Show the token stream for the given file")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the tokens as JSON instead of one per line."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the code to tokenize, or - for standard input."),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Parse the given file and render it back out")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the code to format, or - for standard input."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = filename(submatches);
            let content = read(filename);
            let tree = parse_or_exit(&content, filename);
            debug!(
                "{} is well formed ({} top-level nodes)",
                filename.display(),
                tree.children()
                    .len()
            );
        }
        Some(("tokens", submatches)) => {
            let filename = filename(submatches);
            let content = read(filename);
            let tokens = tokenize(&content, &filename.to_string_lossy());

            if submatches.get_flag("json") {
                match serde_json::to_string_pretty(&tokens) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("error: {}", error);
                        std::process::exit(1);
                    }
                }
            } else {
                for token in &tokens {
                    let location = token.location();
                    println!(
                        "{}:{}\t{}\t{:?}",
                        location.line + 1,
                        location.column + 1,
                        token.kind(),
                        unparse(token)
                    );
                }
            }
        }
        Some(("format", submatches)) => {
            let filename = filename(submatches);
            let content = read(filename);
            let tree = parse_or_exit(&content, filename);

            let raw_output = submatches.get_flag("raw-control-chars");
            let result = if raw_output
                || std::io::stdout()
                    .is_terminal()
            {
                render(&Highlighted(&Terminal), &tree)
            } else {
                unparse(&tree)
            };
            print!("{}", result);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: backolon [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn filename(submatches: &ArgMatches) -> &Path {
    submatches
        .get_one::<String>("filename")
        .map(Path::new)
        .unwrap_or_else(|| Path::new("-"))
}

fn read(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", with_highlighting(|h| concise_loading_error(&error, h)));
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(content: &str, filename: &Path) -> Node {
    match parsing::parse(content, &filename.to_string_lossy()) {
        Ok(tree) => tree,
        Err(error) => {
            let diagnostic = Diagnostic::from(&error);
            eprintln!(
                "{}",
                with_highlighting(|h| full_details(&diagnostic, content, h))
            );
            std::process::exit(1);
        }
    }
}

/// Colour diagnostics only when standard error is a terminal.
fn with_highlighting(f: impl Fn(&dyn Highlight) -> String) -> String {
    if std::io::stderr().is_terminal() {
        f(&Terminal)
    } else {
        f(&Identity)
    }
}
