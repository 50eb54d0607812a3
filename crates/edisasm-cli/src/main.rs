use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use anyhow::{Context, Result};
use evmscope_common::{analyze, decode, group_expressions, render};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "edisasm")]
#[command(about = "EVM Disassembler CLI", long_about = None)]
struct Args {
    /// Input file containing hex bytecode (use - for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Also print the best-effort expression grouping
    #[arg(short, long)]
    expressions: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input = if args.input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("reading stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input))?
    };

    let program = analyze(decode(&input));

    match args.format {
        Format::Text => print!("{}", render(&program)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }

    if args.expressions {
        let analysis = group_expressions(&program);
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    }

    Ok(())
}
