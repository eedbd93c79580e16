use std::borrow::Cow;

use tracing::debug;

use crate::statement::Statement;

/// Convenience mnemonics with no encoding of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoOp {
    /// `NOT Rd, Rs` => `NAND Rd, Rs, Rs`
    Not,
    /// `MOV Rd, Rs` => `AND Rd, Rs, Rs`
    Mov,
    /// `NOP` => `ADDI R1, R1, 0`
    Nop,
    /// `JMP Imm` => `BEQ R0, R0, Imm`
    Jmp,
}

impl PseudoOp {
    /// Matches on mnemonic and operand count together.
    pub fn classify(st: &Statement) -> Option<PseudoOp> {
        match (st.mnemonic.as_str(), st.arity()) {
            ("NOT", 2) => Some(PseudoOp::Not),
            ("MOV", 2) => Some(PseudoOp::Mov),
            ("NOP", 0) => Some(PseudoOp::Nop),
            ("JMP", 1) => Some(PseudoOp::Jmp),
            _ => None,
        }
    }

    fn rewrite(self, ops: &[String]) -> String {
        match self {
            PseudoOp::Not => format!("NAND {}, {}, {}", ops[0], ops[1], ops[1]),
            PseudoOp::Mov => format!("AND {}, {}, {}", ops[0], ops[1], ops[1]),
            PseudoOp::Nop => "ADDI R1, R1, 0".to_string(),
            PseudoOp::Jmp => format!("BEQ R0, R0, {}", ops[0]),
        }
    }
}

/// Rewrite a pseudo-instruction into one real instruction.
///
/// Anything that is not a pseudo-op with the right arity comes back untouched,
/// including real instructions and unknown mnemonics.
pub fn expand(line: &str) -> Cow<'_, str> {
    let Some(st) = Statement::parse(line) else {
        return Cow::Borrowed(line);
    };
    match PseudoOp::classify(&st) {
        Some(op) => {
            let real = op.rewrite(&st.operands);
            debug!(source = line.trim(), expanded = %real, ?op, "pseudo-op expanded");
            Cow::Owned(real)
        }
        None => Cow::Borrowed(line),
    }
}
