pub mod assembler;
pub mod encoder;
pub mod hex;
pub mod instructions;
pub mod listing;
pub mod output;
pub mod pseudo;
pub mod registers;
pub mod statement;

pub mod isa {
    pub mod cpu16; // RRR/RRI/RI 16-bit word encoder
}

pub use assembler::{assemble_file, assemble_source, AsmConfig, AsmError, Assembler, Assembly, ListingFormat, Summary};
pub use encoder::{EncodeError, Encoded, EncodedWord, Encoder, Recovered};
pub use isa::cpu16::Cpu16Encoder;
