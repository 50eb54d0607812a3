mod decoding;
mod annotation;
mod expressions;
mod opcode_table;

use crate::RawStep;

/// Builds a struct-log step. `stack` is bottom first, like the RPC output.
pub(crate) fn step(
    pc: u32,
    op: &str,
    depth: u32,
    stack: &[&str],
    memory: Option<&[&str]>,
) -> RawStep {
    RawStep {
        pc,
        op: op.to_string(),
        depth,
        stack: stack.iter().map(|s| s.to_string()).collect(),
        memory: memory.map(|words| words.iter().map(|w| w.to_string()).collect()),
    }
}

/// 32-byte memory word from a short hex prefix, right-padded with zeros.
pub(crate) fn word(prefix: &str) -> String {
    format!("{prefix:0<64}")
}
