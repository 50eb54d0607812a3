pub mod opcodes;
pub mod types;
pub mod decoder;
pub mod annotator;
pub mod expressions;
pub mod renderer;

pub use types::*;
pub use opcodes::{opcode_map, Opcode, OpcodeInfo};
pub use decoder::decode;
pub use annotator::analyze;
pub use expressions::group_expressions;
pub use renderer::{render, Listing};

/// Decode, annotate and render in one go.
pub fn disassemble(bytecode_hex: &str) -> String {
    render(&analyze(decode(bytecode_hex)))
}
