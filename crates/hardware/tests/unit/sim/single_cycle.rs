use legv8_core::common::RegisterKind;
use legv8_core::common::constants::TEXT_SEGMENT_OFFSET;
use legv8_core::common::error::LineError;
use legv8_core::isa::mnemonic::Mnemonic;
use legv8_core::sim::StepOutcome;
use pretty_assertions::assert_eq;

use crate::common::harness::{TestContext, x};

const STRAIGHT_LINE: &str = "ADDI X1, XZR, #1\nADDI X2, X1, #2\nADD X3, X1, X2";

#[test]
fn steps_one_instruction_at_a_time() {
    let mut sim = TestContext::new().single_cycle(STRAIGHT_LINE);
    assert_eq!(sim.pc(), TEXT_SEGMENT_OFFSET);
    assert_eq!(sim.current_index(), None);
    assert!(sim.current_instruction().is_none());

    assert_eq!(sim.step(), Ok(StepOutcome::Executed(0)));
    assert_eq!(sim.pc(), TEXT_SEGMENT_OFFSET + 4);
    assert_eq!(x(&sim, 1), 1);
    assert_eq!(x(&sim, 2), 0);

    assert_eq!(sim.step(), Ok(StepOutcome::Executed(1)));
    assert_eq!(sim.current_index(), Some(1));
    assert_eq!(sim.previous_index(), Some(0));
    assert_eq!(sim.current_instruction().map(|i| i.mnemonic()), Some(Mnemonic::Addi));
    assert_eq!(sim.previous_instruction().map(|i| i.args().to_vec()), Some(vec![1, 31, 1]));
    assert_eq!(sim.instruction_index(), 2);
}

#[test]
fn finished_program_does_nothing() {
    let mut sim = TestContext::new().single_cycle(STRAIGHT_LINE);
    assert_eq!(sim.run(), Ok(3));
    assert!(sim.is_finished());
    assert_eq!(x(&sim, 3), 4);

    let before = sim.snapshot();
    assert_eq!(sim.step(), Ok(StepOutcome::Finished));
    assert_eq!(sim.snapshot(), before);
    assert_eq!(sim.stats().cycles, 3);
}

#[test]
fn current_line_tracks_source_positions() {
    let mut sim = TestContext::new().single_cycle("\nstart:\nADDI X1, XZR, #1\n\nADDI X2, XZR, #2");
    assert_eq!(sim.current_line(), None);
    let _ = sim.step().expect("step succeeds");
    assert_eq!(sim.current_line(), Some(2));
    let _ = sim.step().expect("step succeeds");
    assert_eq!(sim.current_line(), Some(4));
}

#[test]
fn empty_program_is_already_finished() {
    let mut sim = TestContext::new().single_cycle("\n\n");
    assert!(sim.is_finished());
    assert_eq!(sim.run(), Ok(0));
    assert_eq!(sim.step(), Ok(StepOutcome::Finished));
}

#[test]
fn step_limit_stops_infinite_loops() {
    let mut sim = TestContext::new()
        .with_config(|c| c.general.max_steps = 10)
        .single_cycle("loop: B loop");
    let err = sim.run().expect_err("loop never ends");
    assert_eq!(
        err,
        LineError { message: "Execution step limit of 10 exceeded".to_owned(), line: 0 }
    );
    assert_eq!(sim.stats().cycles, 10);
    assert_eq!(sim.runtime_error(), Some(&err));
    assert_eq!(sim.step(), Err(err));
}

#[test]
fn runtime_fault_is_sticky() {
    let mut sim = TestContext::new().single_cycle(
        "ADDI X1, XZR, #1\nLDUR X2, [XZR, #0]\nADDI X3, XZR, #3",
    );
    let _ = sim.step().expect("first instruction runs");
    let err = sim.step().expect_err("address 0 faults");
    assert_eq!(err.line, 1);
    assert_eq!(sim.step(), Err(err.clone()));
    assert_eq!(sim.run(), Err(err));
    assert_eq!(x(&sim, 3), 0);
    assert_eq!(sim.current_line(), Some(1));
}

#[test]
fn stats_classify_executed_instructions() {
    let sim = TestContext::new().run(
        "MOVZ X9, #0x1000, LSL #16\nADDI X1, XZR, #5\nSTUR X1, [X9, #0]\n\
         LDUR X2, [X9, #0]\nCBZ XZR, end\nADDI X3, XZR, #3\nend: ADD X4, X1, X2",
    );
    let stats = sim.stats();
    assert_eq!(stats.cycles, 6);
    assert_eq!(stats.instructions_retired, 6);
    assert_eq!(stats.inst_alu, 3);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(x(&sim, 3), 0);
    assert_eq!(x(&sim, 4), 10);
}

#[test]
fn memory_holds_stored_values() {
    let sim = TestContext::new()
        .run("MOVZ X9, #0x1000, LSL #16\nMOVZ X1, #0xBEEF\nSTUR X1, [X9, #16]");
    assert_eq!(sim.memory().load_doubleword(0x1000_0010), Ok(0xBEEF));
    assert_eq!(sim.memory().peek(0x1000_0017), 0xEF);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn register_index_must_name_a_register() {
    let sim = TestContext::new().run(STRAIGHT_LINE);
    let _ = sim.register(RegisterKind::D, 32);
}
