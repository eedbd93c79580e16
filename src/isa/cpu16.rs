use tracing::{debug, trace};

use crate::encoder::{EncodeError, Encoded, Encoder, FieldPacker, Recovered};
use crate::instructions::{Format, InstructionTable, FUNCT_BITS, OPCODE_BITS};
use crate::registers::{Reg, REG_BITS};
use crate::statement::Statement;

pub const RRI_IMM_BITS: u32 = 7;
pub const RI_IMM_BITS: u32 = 10;

/// Encoder for the 16-bit RRR/RRI/RI instruction set.
///
/// Strict about mnemonics, lenient about operands: a bad register or immediate
/// is packed as zero and noted in [`Recovered`], never rejected.
pub struct Cpu16Encoder {
    table: InstructionTable,
}

impl Cpu16Encoder {
    pub fn new() -> Self {
        Self {
            table: InstructionTable::new(),
        }
    }

    pub fn table(&self) -> &InstructionTable {
        &self.table
    }
}

impl Default for Cpu16Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer prefix parse: optional sign, then the longest run of decimal digits.
/// Trailing text is ignored; no digits or a value outside i32 gives `None`.
fn parse_imm(tok: &str) -> Option<i32> {
    let (neg, rest) = match tok.as_bytes().first()? {
        b'-' => (true, &tok[1..]),
        b'+' => (false, &tok[1..]),
        _ => (false, tok),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    i32::try_from(if neg { -magnitude } else { magnitude }).ok()
}

struct Operands<'a> {
    st: &'a Statement,
    recovered: Recovered,
}

impl Operands<'_> {
    fn reg(&mut self, idx: usize) -> u16 {
        let tok = self.st.operand(idx).unwrap_or_default();
        match Reg::lookup(tok) {
            Some(r) => r.code(),
            None => {
                debug!(token = tok, "unknown register, using R0");
                self.recovered |= Recovered::UNKNOWN_REGISTER;
                Reg::R0.code()
            }
        }
    }

    /// Two's-complement bit pattern of the immediate; masking happens in the packer.
    fn imm(&mut self, idx: usize) -> u16 {
        let tok = self.st.operand(idx).unwrap_or_default();
        match parse_imm(tok) {
            Some(v) => v as u16,
            None => {
                debug!(token = tok, "malformed immediate, using 0");
                self.recovered |= Recovered::MALFORMED_IMMEDIATE;
                0
            }
        }
    }

    fn short(&mut self) {
        debug!(arity = self.st.arity(), mnemonic = %self.st.mnemonic, "operand count mismatch, fields left at 0");
        self.recovered |= Recovered::OPERAND_COUNT;
    }
}

impl Encoder for Cpu16Encoder {
    fn encode(&self, line: &str) -> Result<Encoded, EncodeError> {
        let st = Statement::parse(line).ok_or(EncodeError::Blank)?;
        let desc = self
            .table
            .get(&st.mnemonic)
            .ok_or_else(|| EncodeError::UnknownOpcode(st.mnemonic.clone()))?;

        let mut ops = Operands {
            st: &st,
            recovered: Recovered::empty(),
        };
        let packer = FieldPacker::new().field(desc.opcode as u16, OPCODE_BITS);

        let word = match desc.format {
            Format::Rrr { funct } => {
                // Written as `Rd, Rs[, Rt]`; packed as rs rt rd.
                let (rd, rs, rt) = match st.arity() {
                    2 => (ops.reg(0), ops.reg(1), Reg::R0.code()),
                    3 => (ops.reg(0), ops.reg(1), ops.reg(2)),
                    _ => {
                        ops.short();
                        (0, 0, 0)
                    }
                };
                packer
                    .field(rs, REG_BITS)
                    .field(rt, REG_BITS)
                    .field(rd, REG_BITS)
                    .field(funct as u16, FUNCT_BITS)
                    .finish()
            }
            Format::Rri => {
                let (rs, rt, imm) = if st.arity() >= 3 {
                    (ops.reg(0), ops.reg(1), ops.imm(2))
                } else {
                    ops.short();
                    (0, 0, 0)
                };
                packer
                    .field(rs, REG_BITS)
                    .field(rt, REG_BITS)
                    .field(imm, RRI_IMM_BITS)
                    .finish()
            }
            Format::Ri => {
                let (rs, imm) = if st.arity() >= 2 {
                    (ops.reg(0), ops.imm(1))
                } else {
                    ops.short();
                    (0, 0)
                };
                packer
                    .field(rs, REG_BITS)
                    .field(imm, RI_IMM_BITS)
                    .finish()
            }
        };

        trace!(mnemonic = desc.mnemonic, format = desc.format.name(), word = %word, "encoded");
        Ok(Encoded {
            desc,
            word,
            recovered: ops.recovered,
        })
    }
}
