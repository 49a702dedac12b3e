//! `tildec`, a command-line front end for the Tilde parsers.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::{fs, io::Write, path::PathBuf, process::ExitCode};
use tilde_syntax::{arithmetic, block, group, tokenize, Grammar, PrecedenceTable};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(
    name = "Tilde",
    bin_name = "tildec",
    about = "Parse Tilde source into fully parenthesized expressions"
)]
struct Args {
    /// The file to parse.
    #[clap(required_unless_present = "code")]
    path: Option<PathBuf>,

    /// Parse this text instead of a file.
    #[clap(short = 'e', long = "eval", conflicts_with = "path")]
    code: Option<String>,

    /// Parse conventional infix arithmetic instead of indented source.
    #[clap(long)]
    arithmetic: bool,

    #[clap(long, value_enum, default_value_t = Table::Default, conflicts_with = "arithmetic")]
    table: Table,

    /// The pipeline stage to print.
    #[clap(long, value_enum, default_value_t = Emit::Text)]
    emit: Emit,

    /// How deeply expressions may nest.
    #[clap(long, default_value_t = tilde_syntax::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Table {
    /// `= ~ * / + -`
    Default,

    /// `= ~ + - * /`
    Conventional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The block tree, as JSON.
    Blocks,

    /// The token sequence, as JSON.
    Tokens,

    /// The expression tree, in Rust debug form.
    Tree,

    /// The expression tree, as JSON.
    Json,

    /// The canonical rendering.
    Text,
}

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = match (&args.code, &args.path) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("expected a path or `-e <code>`"),
    };

    tracing::debug!(arithmetic = args.arithmetic, emit = ?args.emit, "parsing");

    let output = if args.arithmetic {
        emit_arithmetic(&source, &args)?
    } else {
        emit_block_language(&source, &args)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;

    Ok(())
}

fn emit_block_language(source: &str, args: &Args) -> anyhow::Result<String> {
    let grammar = Grammar {
        operators: match args.table {
            Table::Default => PrecedenceTable::default(),
            Table::Conventional => PrecedenceTable::conventional(),
        },
        max_depth: args.max_depth,
    };

    let root = block::build(source, grammar.max_depth)?;
    if args.emit == Emit::Blocks {
        return Ok(serde_json::to_string_pretty(&root)?);
    }

    let tokens = tokenize::tokenize(&root, grammar.max_depth)?;
    if args.emit == Emit::Tokens {
        return Ok(serde_json::to_string_pretty(&tokens)?);
    }

    let expression = group::group(tokens, &grammar)?;

    Ok(match args.emit {
        Emit::Tree => format!("{expression:#?}"),
        Emit::Json => serde_json::to_string_pretty(&expression)?,
        _ => tilde_syntax::render(&expression),
    })
}

fn emit_arithmetic(source: &str, args: &Args) -> anyhow::Result<String> {
    match args.emit {
        Emit::Blocks => anyhow::bail!("arithmetic input has no block tree"),
        Emit::Tokens => Ok(serde_json::to_string_pretty(&arithmetic::lex(source))?),
        emit => {
            let expression = arithmetic::parse(source, args.max_depth)?;

            Ok(match emit {
                Emit::Tree => format!("{expression:#?}"),
                Emit::Json => serde_json::to_string_pretty(&expression)?,
                _ => tilde_syntax::render(&expression),
            })
        }
    }
}
