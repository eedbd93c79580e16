use serde::{Deserialize, Serialize};

/// Register names in code order; the index is the 3-bit register code.
pub const REGISTERS: [&str; 8] = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7"];

pub const REG_BITS: u32 = 3;

/// One of the eight general purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reg(u8);

impl Reg {
    pub const R0: Reg = Reg(0);

    /// Case-insensitive lookup; `None` for anything outside R0..R7.
    pub fn lookup(name: &str) -> Option<Reg> {
        REGISTERS
            .iter()
            .position(|r| r.eq_ignore_ascii_case(name))
            .map(|i| Reg(i as u8))
    }

    pub fn code(self) -> u16 {
        self.0 as u16
    }

    pub fn name(self) -> &'static str {
        REGISTERS[self.0 as usize]
    }
}
