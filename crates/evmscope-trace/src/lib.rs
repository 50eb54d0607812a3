pub mod types;
pub mod config;
pub mod fetcher;
pub mod fingerprint;
pub mod parser;
mod words;

pub use types::*;
pub use config::{MalformedStepPolicy, TraceConfig};
pub use fetcher::{CodeFetcher, StaticCodeFetcher};
pub use fingerprint::{fingerprint, hash_bytecode_hex, try_fingerprint};
pub use parser::{parse_trace, reconstruct_events};
