use crate::types::AnnotatedProgram;
use std::fmt;

/// Text listing of an annotated program.
pub struct Listing<'a>(pub &'a AnnotatedProgram);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.0;
        for instruction in &program.instructions {
            for comment in &instruction.comments {
                writeln!(f, ";; {comment}")?;
            }
            if let Some(label) = &instruction.label {
                writeln!(f, "{label}:")?;
            }

            write!(f, "  {}", instruction.opcode)?;
            if let Some(target) = instruction.jump_target_index.and_then(|i| program.label_of(i)) {
                write!(f, " {target}")?;
            }
            if let Some(value) = &instruction.immediate_value {
                write!(f, " {value}")?;
            }
            writeln!(f, " #0x{:x}", instruction.offset)?;
        }
        Ok(())
    }
}

pub fn render(program: &AnnotatedProgram) -> String {
    Listing(program).to_string()
}
