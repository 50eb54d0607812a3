use crate::types::{AnnotatedProgram, DecodedProgram, Instruction};
use std::collections::HashMap;
use std::ops::Range;
use tracing::trace;

const INIT_COMMENT: &str = "Initialization";
const RUNTIME_COMMENT: &str = "Contract";

/// Splits a decoded program into init/runtime segments, labels every `JUMPDEST` and
/// resolves jumps whose target is pushed right before them.
///
/// When a second free-memory-pointer prologue exists, offsets from that point on are rebased
/// so the runtime segment starts at zero. Jump targets are only looked up inside the segment
/// the jump belongs to.
pub fn analyze(program: DecodedProgram) -> AnnotatedProgram {
    let mut instructions = program.into_instructions();

    let init_markers = find_prologues(&instructions);
    let runtime_start = init_markers.get(1).copied();

    if let Some(&first) = init_markers.first() {
        instructions[first].comments.push(INIT_COMMENT.to_string());
    }
    if let Some(start) = runtime_start {
        instructions[start].comments.push(RUNTIME_COMMENT.to_string());
        let base = instructions[start].offset;
        for instruction in &mut instructions[start..] {
            instruction.offset -= base;
        }
    }

    assign_labels(&mut instructions);
    resolve_jump_targets(&mut instructions, runtime_start);

    AnnotatedProgram {
        instructions,
        init_markers,
        runtime_start,
    }
}

/// Indices of every `PUSH1 0x80, PUSH1 0x40, MSTORE` sequence.
fn find_prologues(instructions: &[Instruction]) -> Vec<usize> {
    instructions
        .windows(3)
        .enumerate()
        .filter(|(_, window)| {
            pushes(&window[0], "0x80") && pushes(&window[1], "0x40") && window[2].is("mstore")
        })
        .map(|(index, _)| index)
        .collect()
}

fn pushes(instruction: &Instruction, value: &str) -> bool {
    instruction.is("push1") && instruction.immediate_value.as_deref() == Some(value)
}

fn assign_labels(instructions: &mut [Instruction]) {
    let mut next = 1;
    for instruction in instructions.iter_mut().filter(|i| i.is("jumpdest")) {
        instruction.label = Some(format!("label{next}"));
        next += 1;
    }
}

fn resolve_jump_targets(instructions: &mut [Instruction], runtime_start: Option<usize>) {
    let split = runtime_start.unwrap_or(instructions.len());
    let segments = [0..split, split..instructions.len()];
    let by_offset: Vec<HashMap<u32, usize>> = segments
        .iter()
        .map(|range| offset_index(instructions, range.clone()))
        .collect();

    for index in 1..instructions.len() {
        let (prev, current) = (&instructions[index - 1], &instructions[index]);
        if !(current.is("jump") || current.is("jumpi")) {
            continue;
        }
        if !(prev.is("push1") || prev.is("push2")) {
            continue;
        }
        let Some(target) = prev.immediate_as_u64().and_then(|t| u32::try_from(t).ok()) else {
            continue;
        };

        let segment = usize::from(index >= split);
        let resolved = by_offset[segment].get(&target).copied();
        trace!(index, target, ?resolved, "static jump");
        instructions[index].jump_target_index = resolved;
    }
}

fn offset_index(instructions: &[Instruction], range: Range<usize>) -> HashMap<u32, usize> {
    range
        .map(|index| (instructions[index].offset, index))
        .collect()
}
