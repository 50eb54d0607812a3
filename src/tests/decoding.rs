use crate::*;

fn opcodes(program: &DecodedProgram) -> Vec<&str> {
    program.instructions().iter().map(|i| i.opcode.as_str()).collect()
}

#[test]
fn test_push_immediate() {
    let program = decode("6001");

    assert_eq!(program.len(), 1);
    let push = &program.instructions()[0];
    assert_eq!(push.opcode, "push1");
    assert_eq!(push.length, 2);
    assert_eq!(push.offset, 0);
    assert_eq!(push.immediate_value.as_deref(), Some("0x01"));
    assert_eq!((push.stack_inputs, push.stack_outputs), (0, 1));
}

#[test]
fn test_prologue_decodes_to_three_instructions() {
    let program = decode("0x6080604052");

    assert_eq!(opcodes(&program), ["push1", "push1", "mstore"]);
    assert_eq!(program.instructions()[0].immediate_value.as_deref(), Some("0x80"));
    assert_eq!(program.instructions()[1].immediate_value.as_deref(), Some("0x40"));
    assert_eq!(program.instructions()[2].offset, 4);
}

#[test]
fn test_unknown_byte_is_placeholder() {
    let program = decode("0c01");

    let unknown = &program.instructions()[0];
    assert_eq!(unknown.opcode, "0x0c");
    assert_eq!(unknown.length, 1);
    assert_eq!((unknown.stack_inputs, unknown.stack_outputs), (0, 0));
    assert_eq!(program.instructions()[1].opcode, "add");
    assert_eq!(program.instructions()[1].offset, 1);
}

#[test]
fn test_empty_input() {
    assert!(decode("").is_empty());
    assert!(decode("0x").is_empty());
}

#[test]
fn test_offsets_are_contiguous() {
    // Dispatcher-like runtime snippet with a PUSH4 selector and PUSH2 jump targets.
    let bytecode = "6080604052348015600f57600080fd5b506004361060285760003560e01c8063c298557814602d575b600080fd5b60336035565b005b6000546001019055565b";
    let program = decode(bytecode);

    assert!(program.len() > 20);
    for pair in program.instructions().windows(2) {
        assert_eq!(pair[1].offset, pair[0].offset + pair[0].length, "gap after {:?}", pair[0]);
    }
    let last = program.instructions().last().unwrap();
    assert_eq!((last.offset + last.length) as usize, bytecode.len() / 2);
}

#[test]
fn test_every_single_byte_decodes() {
    for byte in 0..=255u8 {
        let program = decode(&format!("{byte:02x}"));
        assert_eq!(program.len(), 1, "byte 0x{byte:02x}");
        let length = program.instructions()[0].length;
        if (0x60..=0x7f).contains(&byte) {
            assert_eq!(length, 1 + (byte - 0x5f) as u32);
        } else {
            assert_eq!(length, 1);
        }
    }
}

#[test]
fn test_stop_then_metadata_ends_decoding() {
    // STOP followed by the start of CBOR metadata (LOG2 PUSH5 ...).
    let program = decode("00a2646970667358");
    assert_eq!(opcodes(&program), ["stop"]);

    let program = decode("005b00fe");
    assert_eq!(opcodes(&program), ["stop", "jumpdest", "stop"]);
}

#[test]
fn test_stop_followed_by_push1_continues() {
    let program = decode("0060016002");
    assert_eq!(opcodes(&program), ["stop", "push1", "push1"]);
}

#[test]
fn test_invalid_after_return() {
    let program = decode("f3fe6080");
    assert_eq!(opcodes(&program), ["return", "invalid", "push1"]);

    let program = decode("f3fea26469");
    assert_eq!(opcodes(&program), ["return", "invalid"]);

    // INVALID elsewhere does not trigger the heuristic.
    let program = decode("56fea2");
    assert_eq!(opcodes(&program), ["jump", "invalid", "log2"]);
}

#[test]
fn test_truncated_push() {
    let program = decode("61aa");

    let push = &program.instructions()[0];
    assert_eq!(push.opcode, "push2");
    assert_eq!(push.length, 3);
    assert_eq!(push.immediate_value.as_deref(), Some("0xaa"));
}

#[test]
fn test_push_at_end_has_no_immediate() {
    let program = analyze(decode("7f"));

    let push = &program.instructions[0];
    assert_eq!(push.opcode, "push32");
    assert_eq!(push.length, 33);
    assert_eq!(push.immediate_value, None);
    assert_eq!(render(&program), "  push32 #0x0\n");
}

#[test]
fn test_malformed_hex_degrades() {
    assert_eq!(opcodes(&decode("6001zz60")), ["push1"]);
    assert_eq!(opcodes(&decode("60016")), ["push1"]);
    assert_eq!(opcodes(&decode("  0x6001\n")), ["push1"]);
    assert_eq!(decode("0X6AFF").instructions()[0].opcode, "push11");
}
