use anyhow::{Context, Result, bail};
use clap::Parser;
use relinear::formlang::RenderOptions;
use relinear::logging::init_log;
use std::io::{self, Read, Write};

/// Compile a regular expression over {0,1} into a minimal DFA and an
/// equivalent right-linear grammar.
#[derive(Parser)]
#[command(name = "relinear")]
#[command(version)]
struct Cli {
    /// Pattern using 0, 1, '+', '*' and parentheses; read from stdin if absent
    pattern: Option<String>,

    /// Log specification, e.g. "debug" or "relinear=trace"
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print only the transition table
    #[arg(long, conflicts_with = "grammar_only")]
    table_only: bool,

    /// Print only the grammar productions
    #[arg(long)]
    grammar_only: bool,
}

fn read_pattern() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read pattern from stdin")?;
    match input.split_whitespace().next() {
        Some(token) => Ok(token.to_owned()),
        None => bail!("no pattern given on stdin"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_log(cli.log_level.as_deref())?;

    let pattern = match cli.pattern {
        Some(pattern) => pattern,
        None => read_pattern()?,
    };
    let options = RenderOptions {
        table: !cli.grammar_only,
        grammar: !cli.table_only,
    };

    let rendered = relinear::compile_and_render(&pattern, options)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
