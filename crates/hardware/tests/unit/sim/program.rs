use legv8_core::common::error::LineError;
use legv8_core::config::Config;
use legv8_core::isa::mnemonic::Mnemonic;
use legv8_core::sim::{Program, SingleCycleSimulator, SourceLine};
use pretty_assertions::assert_eq;

use crate::common::harness::init_tracing;

fn line_error(message: &str, line: usize) -> LineError {
    LineError { message: message.to_owned(), line }
}

#[test]
fn collects_one_error_per_bad_line() {
    init_tracing();
    let program = Program::assemble("ADD X1, X2\n\nFOO X1\nB nowhere");
    assert!(!program.is_valid());
    assert_eq!(
        program.errors(),
        &[
            line_error("Missing tokens: ',' 'XREGISTER' ", 0),
            line_error("Unsupported instruction: 'FOO'", 2),
            line_error("Undefined label: 'nowhere'", 3),
        ]
    );
}

#[test]
fn errors_are_ordered_by_line() {
    let program = Program::assemble("B missing\nADDI X1, X2, #9999\nFOO");
    let lines: Vec<_> = program.errors().iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![0, 1, 2]);
}

#[test]
fn simulators_reject_programs_with_errors() {
    let config = Config::default();
    let err = SingleCycleSimulator::from_source("ADD X1, X2\n\nFOO X1\nB nowhere", &config)
        .expect_err("program has compile errors");
    assert_eq!(err.errors().len(), 3);
    assert!(err.to_string().starts_with("program has 3 compile error(s), first at line 1"));
}

#[test]
fn labels_bind_to_the_next_instruction() {
    let program = Program::assemble("start:\nADDI X1, XZR, #1\n\nend:");
    assert!(program.is_valid());
    assert_eq!(program.branch_table()["start"], 0);
    assert_eq!(program.branch_table()["end"], 1);
    assert_eq!(program.instructions().len(), 1);
}

#[test]
fn last_duplicate_label_wins() {
    let program = Program::assemble("a: ADDI X1, XZR, #1\na: ADDI X2, XZR, #2\nB a");
    assert!(program.is_valid());
    assert_eq!(program.branch_table()["a"], 1);
    assert_eq!(program.instructions()[2].args(), &[1]);
}

#[test]
fn labels_on_bad_lines_are_not_bound() {
    let program = Program::assemble("here: ADD X1\nB here");
    assert_eq!(program.errors().len(), 2);
    assert_eq!(program.errors()[0].line, 0);
    assert_eq!(program.errors()[1], line_error("Undefined label: 'here'", 1));
}

#[test]
fn instructions_remember_their_source_line() {
    let program = Program::assemble("ADDI X1, XZR, #1\n\n   \nloop: ADDI X2, XZR, #2");
    assert!(program.is_valid());
    let lines: Vec<_> = program.instructions().iter().map(|i| i.line()).collect();
    assert_eq!(lines, vec![0, 3]);
    assert_eq!(program.lines().len(), 4);
}

#[test]
fn from_lines_matches_assemble() {
    let source = ["MOVZ X1, #5, LSL #16", "ADD X2, X1, X1"];
    let a = Program::from_lines(source);
    let b = Program::assemble(&source.join("\n"));
    assert_eq!(a.instructions(), b.instructions());
}

#[test]
fn analyse_splits_label_mnemonic_and_operands() {
    let line = SourceLine::analyse("top: MOVZ X1, #5, LSL #16").expect("line parses");
    assert_eq!(line.label.as_deref(), Some("top"));
    assert_eq!(line.mnemonic, Some(Mnemonic::Movz));
    assert_eq!(line.operands, vec!["X1", "#5", "LSL", "#16"]);

    let line = SourceLine::analyse("LDUR X1, [SP, #8]").expect("line parses");
    assert_eq!(line.label, None);
    assert_eq!(line.operands, vec!["X1", "SP", "#8"]);
}

#[test]
fn analyse_accepts_blank_lines() {
    let line = SourceLine::analyse("   ").expect("blank line parses");
    assert!(line.tokens.is_empty());
    assert_eq!(line.mnemonic, None);
    assert_eq!(line.label, None);
}

#[test]
fn analyse_reports_structure_errors() {
    let err = SourceLine::analyse("FOO X1").expect_err("FOO is not a mnemonic");
    assert_eq!(err.to_string(), "Unsupported instruction: 'FOO'");
}
