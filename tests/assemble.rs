use std::path::PathBuf;

use pretty_assertions::assert_eq;

use cpu16_asm::output::HexWriter;
use cpu16_asm::{assemble_file, assemble_source, AsmConfig, AsmError, Assembler, Cpu16Encoder};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cpu16-asm-{}-{name}", std::process::id()))
}

const PROGRAM: &str = "\
ADD R1, R2, R3

   \t
FOO R1, R2
nop
JMP 10
ADDI R2, R3, 5
";

#[test]
fn source_to_hex_words() {
    let asm = assemble_source(PROGRAM).unwrap();
    assert_eq!(asm.words, vec!["0990", "2480", "600A", "2985"]);
    assert_eq!(asm.summary.lines, 5);
    assert_eq!(asm.summary.encoded, 4);
    assert_eq!(asm.summary.rejected, 1);
}

#[test]
fn blank_lines_do_not_consume_sequence_numbers() {
    let asm = assemble_source(PROGRAM).unwrap();
    let seqs: Vec<_> = asm.rows.iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    assert_eq!(asm.rows[1].source, "FOO R1, R2");
}

#[test]
fn unknown_opcode_is_reported_and_skipped() {
    let asm = assemble_source(PROGRAM).unwrap();
    let bad = &asm.rows[1];
    assert!(!bad.is_ok());
    assert_eq!(bad.binary, None);
    assert_eq!(bad.hex, None);
    assert_eq!(bad.error.as_deref(), Some("unknown opcode `FOO`"));
    // following lines still assembled
    assert!(asm.rows[2..].iter().all(|r| r.is_ok()));
}

#[test]
fn listing_keeps_original_text_and_expansion() {
    let asm = assemble_source(PROGRAM).unwrap();
    let nop = &asm.rows[2];
    assert_eq!(nop.source, "nop");
    assert_eq!(nop.expanded.as_deref(), Some("ADDI R1, R1, 0"));
    assert_eq!(nop.binary.as_deref(), Some("0010010010000000"));
    assert_eq!(nop.hex.as_deref(), Some("2480"));
    assert_eq!(asm.rows[0].expanded, None);
}

#[test]
fn empty_source_produces_nothing() {
    let asm = assemble_source("\n  \n\t\n").unwrap();
    assert!(asm.rows.is_empty());
    assert!(asm.words.is_empty());
    assert_eq!(asm.summary.lines, 0);
}

#[test]
fn run_writes_through_a_hex_writer() {
    let enc = Cpu16Encoder::new();
    let mut sink = HexWriter::new(Vec::new());
    let mut seen = 0;
    let summary = Assembler::new(&enc)
        .run("MOV R3, R4\r\nBAD\r\nLI R7, -1\r\n".as_bytes(), &mut sink, |_| seen += 1)
        .unwrap();
    assert_eq!(seen, 3);
    assert_eq!(summary.encoded, 2);
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(text, "1234\nFFFF\n");
}

#[test]
fn file_round_trip() {
    let input = scratch("ok.asm");
    let output = scratch("ok.hex");
    std::fs::write(&input, PROGRAM).unwrap();
    let cfg = AsmConfig {
        input: input.clone(),
        output: output.clone(),
        ..AsmConfig::default()
    };
    let mut rows = Vec::new();
    let summary = assemble_file(&cfg, |r| rows.push(r.clone())).unwrap();
    assert_eq!(summary.encoded, 4);
    assert_eq!(rows.len(), 5);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "0990\n2480\n600A\n2985\n");
    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn missing_source_fails_before_output_is_created() {
    let input = scratch("missing.asm");
    let output = scratch("missing.hex");
    let _ = std::fs::remove_file(&output);
    let cfg = AsmConfig {
        input,
        output: output.clone(),
        ..AsmConfig::default()
    };
    let err = assemble_file(&cfg, |_| {}).unwrap_err();
    assert!(matches!(err, AsmError::SourceUnavailable { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[test]
fn uncreatable_output_has_its_own_status() {
    let input = scratch("out-fail.asm");
    std::fs::write(&input, "NOP\n").unwrap();
    let cfg = AsmConfig {
        input: input.clone(),
        output: scratch("no-such-dir").join("program.hex"),
        ..AsmConfig::default()
    };
    let err = assemble_file(&cfg, |_| {}).unwrap_err();
    assert!(matches!(err, AsmError::OutputUnavailable { .. }));
    assert_eq!(err.exit_code(), 3);
    let _ = std::fs::remove_file(&input);
}
