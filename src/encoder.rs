use std::fmt;

use bitflags::bitflags;
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::instructions::InstrDesc;

pub const WORD_BITS: u32 = 16;

/// One 16-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedWord(u16);

impl EncodedWord {
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    /// MSB-first `0`/`1` string, always 16 characters.
    pub fn to_bit_string(self) -> String {
        self.0
            .view_bits::<Msb0>()
            .iter()
            .by_vals()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    pub fn to_hex(self) -> String {
        format!("{:04X}", self.0)
    }
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

bitflags! {
/// Operand problems that were silently patched to zero while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovered: u8 {
const UNKNOWN_REGISTER = 1 << 0; // register token outside R0..R7, packed as R0
const MALFORMED_IMMEDIATE = 1 << 1; // immediate not an integer, packed as 0
const OPERAND_COUNT = 1 << 2; // operand list too short/long for the format, fields left at 0
}
}

/// Result of encoding one real instruction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Encoded {
    pub desc: &'static InstrDesc,
    pub word: EncodedWord,
    pub recovered: Recovered,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),
    #[error("line has no mnemonic")]
    Blank,
}

pub trait Encoder {
    fn encode(&self, line: &str) -> Result<Encoded, EncodeError>;
}

/// Appends fixed-width fields to a word, most significant first.
#[derive(Debug, Default)]
pub struct FieldPacker {
    word: u16,
    used: u32,
}

impl FieldPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the low `width` bits of `value`; higher bits are dropped.
    pub fn field(mut self, value: u16, width: u32) -> Self {
        debug_assert!(width > 0 && self.used + width <= WORD_BITS);
        let mask = (1u16 << width) - 1;
        self.word = (self.word << width) | (value & mask);
        self.used += width;
        self
    }

    pub fn finish(self) -> EncodedWord {
        assert_eq!(self.used, WORD_BITS, "instruction layout must fill 16 bits");
        EncodedWord(self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_places_fields_msb_first() {
        let w = FieldPacker::new()
            .field(0b101, 3)
            .field(0b011, 3)
            .field(0x3FF, 10)
            .finish();
        assert_eq!(w.raw(), 0b101_011_1111111111);
        assert_eq!(w.to_bit_string(), "1010111111111111");
    }

    #[test]
    fn packer_truncates_wide_values() {
        let w = FieldPacker::new().field(0, 9).field(0xFFFF, 7).finish();
        assert_eq!(w.to_hex(), "007F");
    }

    #[test]
    #[should_panic(expected = "must fill 16 bits")]
    fn short_layout_is_rejected() {
        let _ = FieldPacker::new().field(1, 3).finish();
    }

    #[test]
    fn bit_string_is_always_sixteen_chars() {
        assert_eq!(EncodedWord::new(0).to_bit_string(), "0000000000000000");
        assert_eq!(EncodedWord::new(0x8001).to_string(), "1000000000000001");
    }
}
