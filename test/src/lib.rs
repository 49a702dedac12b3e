#![allow(missing_docs)]

use rstest::rstest;

#[rstest]
#[timeout(std::time::Duration::from_secs(10))]
fn tests(#[files("tests/**/*.test.tilde")] file: std::path::PathBuf) {
    use std::fs;
    use tilde_syntax::{render, Grammar, PrecedenceTable};

    enum Expectation {
        Render(String),
        Error(String),
    }

    let code = fs::read_to_string(&file).expect("failed to read file");

    let mut expectation = None;
    let mut grammar = Grammar::default();
    let mut arithmetic = false;

    for directive in code.lines().map_while(|line| line.strip_prefix("# ")) {
        let Some((key, value)) = directive.split_once(':') else {
            continue;
        };

        let value = value.trim();
        match key {
            "expect" => expectation = Some(Expectation::Render(value.to_string())),
            "error" => expectation = Some(Expectation::Error(value.to_string())),
            "table" => {
                grammar.operators = match value {
                    "default" => PrecedenceTable::default(),
                    "conventional" => PrecedenceTable::conventional(),
                    _ => panic!("unknown table: {value}"),
                }
            }
            "mode" => arithmetic = value == "arithmetic",
            _ => panic!("unknown directive: {key}"),
        }
    }

    let expectation =
        expectation.expect("expected test to begin with `# expect:` or `# error:`");

    let parse = |code: &str| {
        if arithmetic {
            tilde_syntax::parse_arithmetic(code)
        } else {
            tilde_syntax::parse_block_language_with(code, &grammar)
        }
    };

    // Arithmetic input has no comments, so the header is dropped. Block
    // language input keeps it to preserve line numbers.
    let source = if arithmetic {
        code.lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        code.clone()
    };

    match (parse(&source), expectation) {
        (Ok(expression), Expectation::Render(expected)) => {
            let rendered = render(&expression);
            assert_eq!(rendered, expected);

            if !arithmetic {
                let reparsed = parse(&rendered).expect("rendering should reparse");
                assert_eq!(render(&reparsed), rendered, "rendering is not idempotent");
            }
        }
        (Err(error), Expectation::Error(expected)) => assert_eq!(error.to_string(), expected),
        (Ok(expression), Expectation::Error(expected)) => {
            panic!("expected error `{expected}`, but parsed {expression}")
        }
        (Err(error), Expectation::Render(expected)) => {
            panic!("expected `{expected}`, but failed with `{error}`")
        }
    }
}
