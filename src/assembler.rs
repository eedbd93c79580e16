use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoder::Encoder;
use crate::hex;
use crate::isa::cpu16::Cpu16Encoder;
use crate::listing::ListingRow;
use crate::output::{HexSink, HexWriter};
use crate::pseudo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListingFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsmConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ListingFormat,
    pub quiet: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.asm"),
            output: PathBuf::from("program.hex"),
            format: ListingFormat::Text,
            quiet: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("cannot open source {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create output {}: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl AsmError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AsmError::SourceUnavailable { .. } => 2,
            AsmError::OutputUnavailable { .. } => 3,
            AsmError::Read(_) | AsmError::Write(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Non-blank lines seen; also the last sequence number handed out.
    pub lines: usize,
    pub encoded: usize,
    pub rejected: usize,
}

/// Everything produced from an in-memory source.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub rows: Vec<ListingRow>,
    pub words: Vec<String>,
    pub summary: Summary,
}

/// Line-at-a-time driver: expand, encode, format. Holds no per-line state.
pub struct Assembler<'e, E: Encoder> {
    encoder: &'e E,
}

impl<'e, E: Encoder> Assembler<'e, E> {
    pub fn new(encoder: &'e E) -> Self {
        Self { encoder }
    }

    pub fn assemble_line(&self, seq: usize, source: &str) -> ListingRow {
        let real = pseudo::expand(source);
        let mut row = ListingRow {
            seq,
            source: source.trim().to_string(),
            expanded: match &real {
                Cow::Owned(s) => Some(s.clone()),
                Cow::Borrowed(_) => None,
            },
            binary: None,
            hex: None,
            error: None,
        };

        let encoded = match self.encoder.encode(&real) {
            Ok(enc) => enc,
            Err(e) => {
                warn!(seq, source = %row.source, error = %e, "line rejected");
                row.error = Some(e.to_string());
                return row;
            }
        };

        let bits = encoded.word.to_bit_string();
        match hex::bits_to_hex(&bits) {
            Ok(h) => row.hex = Some(h),
            Err(e) => {
                warn!(seq, bits = %bits, error = %e, "hex formatting failed");
                row.error = Some(e.to_string());
            }
        }
        row.binary = Some(bits);
        row
    }

    /// Blank lines are skipped without consuming a sequence number.
    pub fn run<R: BufRead, S: HexSink>(
        &self,
        reader: R,
        sink: &mut S,
        mut report: impl FnMut(&ListingRow),
    ) -> Result<Summary, AsmError> {
        let mut summary = Summary::default();
        for line in reader.lines() {
            let line = line.map_err(AsmError::Read)?;
            if line.trim().is_empty() {
                continue;
            }
            summary.lines += 1;
            let row = self.assemble_line(summary.lines, &line);
            match &row.hex {
                Some(h) => {
                    sink.write_word(h).map_err(AsmError::Write)?;
                    summary.encoded += 1;
                }
                None => summary.rejected += 1,
            }
            report(&row);
        }
        sink.finish().map_err(AsmError::Write)?;
        Ok(summary)
    }
}

pub fn assemble_source(source: &str) -> Result<Assembly, AsmError> {
    let encoder = Cpu16Encoder::new();
    let mut rows = Vec::new();
    let mut words = Vec::new();
    let summary = Assembler::new(&encoder).run(source.as_bytes(), &mut words, |r| rows.push(r.clone()))?;
    Ok(Assembly { rows, words, summary })
}

/// Assemble `config.input` into `config.output`, passing each listing row to `report`.
///
/// The output file is only created once the input has been opened.
pub fn assemble_file(config: &AsmConfig, report: impl FnMut(&ListingRow)) -> Result<Summary, AsmError> {
    let input = File::open(&config.input).map_err(|source| AsmError::SourceUnavailable {
        path: config.input.clone(),
        source,
    })?;
    let output = File::create(&config.output).map_err(|source| AsmError::OutputUnavailable {
        path: config.output.clone(),
        source,
    })?;
    info!(input = %config.input.display(), output = %config.output.display(), "assembling");

    let encoder = Cpu16Encoder::new();
    let mut sink = HexWriter::new(output);
    let summary = Assembler::new(&encoder).run(BufReader::new(input), &mut sink, report)?;
    info!(lines = summary.lines, encoded = summary.encoded, rejected = summary.rejected, "done");
    Ok(summary)
}
