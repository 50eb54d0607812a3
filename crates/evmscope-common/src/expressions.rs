//! Best-effort expression grouping for display.
//!
//! This is a shallow stack simulation. It does not model `DUP*`/`SWAP*` reordering and its
//! output is never used for anything but visual grouping; nothing else in the crate depends
//! on it.

use crate::types::{AnnotatedProgram, ExpressionAnalysis, ExpressionNode};

pub fn group_expressions(program: &AnnotatedProgram) -> ExpressionAnalysis {
    let mut stacks = Vec::with_capacity(program.instructions.len());
    let mut stack: Vec<String> = Vec::new();
    let mut open: Vec<ExpressionNode> = Vec::new();

    for (index, instruction) in program.instructions.iter().enumerate() {
        if instruction.is("push0") {
            stack.push("0x0".to_string());
        } else if instruction.opcode.starts_with("push") {
            if let Some(value) = &instruction.immediate_value {
                stack.push(value.clone());
            }
        } else if instruction.is("mstore") {
            stack.pop();
            stack.pop();
        }
        stacks.push(stack.clone());

        let wanted = instruction.stack_inputs as usize;
        let mut children = Vec::new();
        let mut consumed = 0usize;
        while consumed < wanted {
            let Some(node) = open.pop() else { break };
            consumed += node.produced_count as usize;
            children.push(node);
        }
        children.reverse();

        open.push(ExpressionNode {
            span_start: children.first().map_or(index, |child| child.span_start),
            span_end: index,
            produced_count: instruction.stack_outputs,
            children,
        });
    }

    ExpressionAnalysis { stacks, nodes: open }
}
