use crate::{
    opcodes::Opcode,
    types::{DecodedProgram, Instruction},
};
use tracing::{debug, warn};

/// Decodes hex-encoded bytecode into an instruction listing.
///
/// Never fails. Unmapped bytes become one-byte placeholder instructions named after the byte,
/// a `PUSHn` cut short by the end of input keeps whatever immediate bytes were present (none
/// at all leaves `immediate_value` empty), and a non-hex character ends decoding at the last
/// complete byte before it.
///
/// Decoding also stops right after a `STOP` (or an `INVALID` directly after `RETURN`) unless
/// the next byte is `PUSH1` or `JUMPDEST`. That keeps trailing compiler metadata from being
/// listed as instructions.
pub fn decode(bytecode_hex: &str) -> DecodedProgram {
    let bytes = hex_prefix_bytes(bytecode_hex);
    let mut instructions: Vec<Instruction> = Vec::new();
    let mut cursor = 0usize;
    let mut offset = 0u32;
    let mut was_stop = false;
    let mut previous: Option<Opcode> = None;

    while cursor < bytes.len() {
        let opcode = Opcode(bytes[cursor]);

        if was_stop && opcode != Opcode::PUSH1 && opcode != Opcode::JUMPDEST {
            debug!(offset, next = %opcode, "stop heuristic ended decoding");
            break;
        }

        let instruction = match opcode.info() {
            Some(info) => {
                let immediate_size = opcode.immediate_size();
                let start = (cursor + 1).min(bytes.len());
                let end = (cursor + 1 + immediate_size).min(bytes.len());
                let immediate_value =
                    (start < end).then(|| format!("0x{}", hex::encode(&bytes[start..end])));
                Instruction {
                    opcode: info.name.to_string(),
                    offset,
                    length: 1 + immediate_size as u32,
                    stack_inputs: info.inputs,
                    stack_outputs: info.outputs,
                    immediate_value,
                    label: None,
                    comments: Vec::new(),
                    jump_target_index: None,
                }
            }
            None => Instruction {
                opcode: opcode.to_string(),
                offset,
                length: 1,
                stack_inputs: 0,
                stack_outputs: 0,
                immediate_value: None,
                label: None,
                comments: Vec::new(),
                jump_target_index: None,
            },
        };

        let after_return = previous == Some(Opcode::RETURN);
        was_stop = opcode == Opcode::STOP || (opcode == Opcode::INVALID && after_return);
        previous = Some(opcode);

        offset += instruction.length;
        cursor += instruction.length as usize;
        instructions.push(instruction);
    }

    DecodedProgram { instructions }
}

/// Longest prefix of `input` that decodes as whole hex bytes.
fn hex_prefix_bytes(input: &str) -> Vec<u8> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .as_bytes();

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for (index, pair) in digits.chunks_exact(2).enumerate() {
        let mut byte = [0u8; 1];
        if hex::decode_to_slice(pair, &mut byte).is_err() {
            warn!(position = index * 2, "non-hex input, decoding stops here");
            break;
        }
        bytes.push(byte[0]);
    }
    bytes
}
