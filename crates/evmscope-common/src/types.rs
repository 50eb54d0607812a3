use serde::{Deserialize, Serialize};

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Lowercase mnemonic, or the raw byte as `0x..` when the byte is unmapped.
    pub opcode: String,
    /// Byte offset. Relative to the runtime segment once annotated.
    pub offset: u32,
    /// Size in bytes, `1 + n` for `PUSHn`.
    pub length: u32,
    pub stack_inputs: u8,
    pub stack_outputs: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_target_index: Option<usize>,
}

impl Instruction {
    pub fn is(&self, mnemonic: &str) -> bool {
        self.opcode == mnemonic
    }

    /// Immediate operand parsed as an unsigned offset. `None` if absent or wider than 64 bits.
    pub fn immediate_as_u64(&self) -> Option<u64> {
        let digits = self.immediate_value.as_deref()?.trim_start_matches("0x");
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Some(0);
        }
        u64::from_str_radix(digits, 16).ok()
    }
}

/// The ordered output of [`crate::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedProgram {
    pub(crate) instructions: Vec<Instruction>,
}

impl DecodedProgram {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Which code region an instruction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    /// Everything before the second free-memory-pointer prologue (or the whole program).
    Init,
    Runtime,
}

/// A decoded program with labels, comments and resolved jump targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedProgram {
    pub instructions: Vec<Instruction>,
    /// Index of every `PUSH1 0x80, PUSH1 0x40, MSTORE` prologue.
    pub init_markers: Vec<usize>,
    /// Index of the second prologue, where runtime code starts.
    pub runtime_start: Option<usize>,
}

impl AnnotatedProgram {
    pub fn segment_of(&self, index: usize) -> Segment {
        match self.runtime_start {
            Some(start) if index >= start => Segment::Runtime,
            _ => Segment::Init,
        }
    }

    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.instructions.get(index)?.label.as_deref()
    }

    /// The instruction a statically resolved jump at `index` lands on.
    pub fn jump_target(&self, index: usize) -> Option<&Instruction> {
        let target = self.instructions.get(index)?.jump_target_index?;
        self.instructions.get(target)
    }
}

/// Advisory grouping of instructions into expression-like spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionNode {
    pub span_start: usize,
    pub span_end: usize,
    pub produced_count: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExpressionNode>,
}

/// Output of the best-effort stack simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionAnalysis {
    /// Symbolic stack after each instruction, top last.
    pub stacks: Vec<Vec<String>>,
    /// Top-level expression nodes in program order.
    pub nodes: Vec<ExpressionNode>,
}
