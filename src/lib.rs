//! EVM bytecode disassembly and struct-log trace reconstruction.

pub use evmscope_common::{
    analyze, decode, disassemble, group_expressions, opcode_map, render, AnnotatedProgram,
    DecodedProgram, ExpressionAnalysis, ExpressionNode, Instruction, Listing, Opcode, OpcodeInfo,
    Segment,
};
pub use evmscope_trace::{
    fingerprint, hash_bytecode_hex, parse_trace, reconstruct_events, try_fingerprint, CallKind,
    CodeFetcher, FetchError, MalformedStepPolicy, RawStep, RawTrace, StaticCodeFetcher,
    TraceConfig, TraceError, TraceEvent,
};

#[cfg(test)]
mod tests;
