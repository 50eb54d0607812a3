use crate::*;

// Constructor and runtime, both starting with the free-memory-pointer prologue and both
// jumping to offset 8 of their own segment.
//
//  init:    push1 0x80, push1 0x40, mstore, push1 0x08, jump, jumpdest, return, invalid
//  runtime: push1 0x80, push1 0x40, mstore, push1 0x08, jump, jumpdest, stop
const TWO_SEGMENTS: &str = "60806040526008565bf3fe60806040526008565b00";

#[test]
fn test_prologue_comment() {
    let program = analyze(decode("6080604052"));

    assert_eq!(program.instructions.len(), 3);
    assert_eq!(program.instructions[0].comments, ["Initialization"]);
    assert_eq!(program.init_markers, [0]);
    assert_eq!(program.runtime_start, None);
    assert_eq!(program.segment_of(2), Segment::Init);
}

#[test]
fn test_runtime_segment_is_rebased() {
    let program = analyze(decode(TWO_SEGMENTS));

    assert_eq!(program.init_markers, [0, 8]);
    assert_eq!(program.runtime_start, Some(8));
    assert_eq!(program.instructions[8].comments, ["Contract"]);
    assert_eq!(program.instructions[8].offset, 0);
    assert_eq!(program.instructions[14].offset, 9);
    // Init offsets stay absolute.
    assert_eq!(program.instructions[7].offset, 10);
    assert_eq!(program.segment_of(7), Segment::Init);
    assert_eq!(program.segment_of(8), Segment::Runtime);
}

#[test]
fn test_jumps_resolve_within_their_segment() {
    let program = analyze(decode(TWO_SEGMENTS));

    assert_eq!(program.instructions[4].jump_target_index, Some(5));
    assert_eq!(program.instructions[12].jump_target_index, Some(13));
    assert_eq!(program.jump_target(12).map(|i| i.opcode.as_str()), Some("jumpdest"));
}

#[test]
fn test_jumpdest_labels_are_sequential() {
    let program = analyze(decode(TWO_SEGMENTS));

    assert_eq!(program.label_of(5), Some("label1"));
    assert_eq!(program.label_of(13), Some("label2"));
    assert_eq!(program.label_of(0), None);

    let program = analyze(decode("5b5b5b"));
    let labels: Vec<_> = program.instructions.iter().filter_map(|i| i.label.clone()).collect();
    assert_eq!(labels, ["label1", "label2", "label3"]);
}

#[test]
fn test_jumpi_with_push2_target() {
    // push2 0x0005, jumpi, stop, jumpdest
    let program = analyze(decode("61000557005b"));

    assert_eq!(program.instructions[1].opcode, "jumpi");
    assert_eq!(program.instructions[1].jump_target_index, Some(3));
}

#[test]
fn test_unresolved_jump_is_not_an_error() {
    // push1 0x09 points past the end.
    let program = analyze(decode("6009565b"));
    assert_eq!(program.instructions[1].jump_target_index, None);

    // Dynamic jump: target comes from the stack, not a push.
    let program = analyze(decode("6004805b56"));
    assert_eq!(program.instructions.len(), 4);
    assert_eq!(program.instructions[3].opcode, "jump");
    assert_eq!(program.instructions[3].jump_target_index, None);
}

#[test]
fn test_jump_target_can_be_non_jumpdest() {
    // push1 0x03, jump, stop lands on offset 3 which is the stop.
    let program = analyze(decode("60035600"));
    assert_eq!(program.instructions[1].jump_target_index, Some(2));
    assert_eq!(program.label_of(2), None);
}
