use clap::Parser;
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;
use alloy_primitives::Address;
use anyhow::{Context, Result};
use evmscope_trace::{parse_trace, MalformedStepPolicy, RawTrace, StaticCodeFetcher, TraceConfig};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "etrace")]
#[command(about = "EVM struct-log trace to call/create events", long_about = None)]
struct Args {
    /// File holding a debug_traceTransaction result or response (use - for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Transaction sender, used to derive created contract addresses
    #[arg(short, long)]
    sender: Address,

    /// JSON object mapping addresses to deployed bytecode
    #[arg(long)]
    codes: Option<PathBuf>,

    /// TOML file with trace settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-address bytecode fetch timeout
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Maximum concurrent bytecode fetches
    #[arg(long)]
    concurrency: Option<usize>,

    /// Abort on the first malformed call/create step instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn load_config(args: &Args) -> Result<TraceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => TraceConfig::default(),
    };

    if let Some(timeout_ms) = args.timeout_ms {
        config.fetch_timeout_ms = timeout_ms;
    }
    if let Some(concurrency) = args.concurrency {
        config.fetch_concurrency = concurrency;
    }
    if args.strict {
        config.malformed_step = MalformedStepPolicy::Fail;
    }
    Ok(config)
}

fn load_codes(path: Option<&PathBuf>) -> Result<StaticCodeFetcher> {
    let Some(path) = path else {
        return Ok(StaticCodeFetcher::new());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: HashMap<String, String> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    raw.into_iter()
        .map(|(address, code)| {
            let address = address
                .parse::<Address>()
                .with_context(|| format!("invalid address {address}"))?;
            Ok((address, code))
        })
        .collect()
}

/// Accepts either the bare trace result or a JSON-RPC response wrapping it.
fn load_trace(text: &str) -> Result<RawTrace> {
    let mut value: Value = serde_json::from_str(text).context("trace is not valid JSON")?;
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    serde_json::from_value(value).context("unexpected trace shape")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let fetcher = load_codes(args.codes.as_ref())?;

    let input = if args.input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("reading stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input))?
    };
    let trace = load_trace(&input)?;

    info!(codes = fetcher.len(), "parsing trace");
    let events = parse_trace(args.sender, &trace, &fetcher, &config).await?;
    if events.is_none() {
        info!("trace unavailable: no structLogs");
    }

    println!("{}", serde_json::to_string_pretty(&events)?);

    Ok(())
}
