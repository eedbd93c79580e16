use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const OPCODE_BITS: u32 = 3;
pub const FUNCT_BITS: u32 = 4;

/// Field layout of an instruction word. Only RRR carries a funct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// opcode(3) rs(3) rt(3) rd(3) funct(4)
    Rrr { funct: u8 },
    /// opcode(3) rs(3) rt(3) imm(7)
    Rri,
    /// opcode(3) rs(3) imm(10)
    Ri,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Rrr { .. } => "RRR",
            Format::Rri => "RRI",
            Format::Ri => "RI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub format: Format,
}

const fn rrr(mnemonic: &'static str, funct: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode: 0b000, format: Format::Rrr { funct } }
}

const fn rri(mnemonic: &'static str, opcode: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode, format: Format::Rri }
}

const fn ri(mnemonic: &'static str, opcode: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode, format: Format::Ri }
}

pub const TABLE: &[InstrDesc] = &[
    // ALU group, opcode 000, selected by funct
    rrr("ADD", 0b0000),
    rrr("INC", 0b0001),
    rrr("SUB", 0b0010),
    rrr("DEC", 0b0011),
    rrr("AND", 0b0100),
    rrr("OR", 0b0101),
    rrr("NAND", 0b0110),
    rrr("XOR", 0b0111),
    rrr("SHFL", 0b1000),
    rrr("SHFR", 0b1001),
    rrr("SLL", 0b1010),
    rrr("SRR", 0b1011),
    rrr("SRA", 0b1100),
    rrr("MUL", 0b1101),
    rrr("SLT", 0b1110),
    rrr("SGT", 0b1111),
    rri("ADDI", 0b001),
    rri("SUBI", 0b010),
    rri("BEQ", 0b011),
    ri("LW", 0b100),
    ri("SW", 0b101),
    ri("JNZ", 0b110),
    ri("LI", 0b111),
];

/// Mnemonic index over [`TABLE`]. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct InstructionTable {
    by_name: HashMap<&'static str, &'static InstrDesc>,
}

impl InstructionTable {
    pub fn new() -> Self {
        let by_name = TABLE.iter().map(|d| (d.mnemonic, d)).collect();
        Self { by_name }
    }

    /// Lookup by canonical (uppercase) mnemonic.
    pub fn get(&self, mnemonic: &str) -> Option<&'static InstrDesc> {
        self.by_name.get(mnemonic).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}
