use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{TestContext, px, x};

const COUNT_DOWN: &str = "\
ADDI X1, XZR, #3
loop: SUBIS X1, X1, #1
ADDI X2, X2, #5
B.NE loop
ADDI X3, XZR, #9";

const SUBROUTINE: &str = "\
BL sub
ADDI X2, XZR, #2
B end
sub: ADDI X1, XZR, #1
BR LR
end: ADDI X3, XZR, #3";

const FLOATING_POINT: &str = "\
MOVZ X9, #0x1000, LSL #16
MOVZ X1, #0x4000, LSL #48
STUR X1, [X9, #0]
LDURD D1, [X9, #0]
FADDD D2, D1, D1
FCMPD D2, D1
B.GT bigger
ADDI X4, XZR, #1
bigger: STURD D2, [X9, #8]
LDUR X5, [X9, #8]";

const LOAD_ADDRESS: &str = "\
LDA X1, target
ADDI X2, XZR, #1
target: ADD X3, X1, XZR";

#[rstest]
#[case::forwarding("MOVZ X1, #5\nMOVZ X2, #6\nSUB X3, X1, X2")]
#[case::taken_cbnz("ADDI X1, XZR, #1\nCBNZ X1, target\nADDI X2, XZR, #2\ntarget: ADDI X3, XZR, #3")]
#[case::load_use(
    "MOVZ X9, #0x1000, LSL #16\nADDI X5, XZR, #21\nSTUR X5, [X9, #0]\nLDUR X1, [X9, #0]\nADD X2, X1, X1"
)]
#[case::flag_branch("SUBIS X2, XZR, #0\nB.EQ done\nADDI X3, XZR, #1\ndone: ADDI X4, XZR, #4")]
#[case::count_down(COUNT_DOWN)]
#[case::subroutine(SUBROUTINE)]
#[case::floating_point(FLOATING_POINT)]
#[case::load_address(LOAD_ADDRESS)]
#[case::exclusive(
    "MOVZ X9, #0x1000, LSL #16\nADDI X1, XZR, #42\nLDXR X2, [X9, #0]\nSTXR X1, X3, [X9]\nLDUR X4, [X9, #0]"
)]
#[case::stack(
    "SUBI SP, SP, #16\nADDI X1, XZR, #7\nSTUR X1, [SP, #8]\nLDUR X2, [SP, #8]\nADDI SP, SP, #16"
)]
fn both_simulators_agree(#[case] source: &str) {
    let ctx = TestContext::new();
    let single = ctx.run(source);
    let pipelined = ctx.run_pipelined(source);
    assert_eq!(single.snapshot(), pipelined.visible().clone());
    assert_eq!(single.flags(), pipelined.flags());
    assert_eq!(
        single.stats().instructions_retired,
        pipelined.stats().instructions_retired
    );
}

#[test]
fn untaken_branch_after_non_flag_setting_arithmetic() {
    let source = "ADDI X1, XZR, #10\nSUBI X2, X1, #3\nB.EQ done\ndone: ADD X3, X1, X2";
    let ctx = TestContext::new();
    let program = legv8_core::sim::Program::assemble(source);
    assert!(program.errors().is_empty());

    let single = ctx.run(source);
    assert_eq!([x(&single, 1), x(&single, 2), x(&single, 3)], [10, 7, 17]);
    assert!(!single.branch_taken());

    let pipelined = ctx.run_pipelined(source);
    assert_eq!([px(&pipelined, 1), px(&pipelined, 2), px(&pipelined, 3)], [10, 7, 17]);
}

#[test]
fn loop_runs_to_completion() {
    let ctx = TestContext::new();
    let single = ctx.run(COUNT_DOWN);
    assert_eq!(x(&single, 1), 0);
    assert_eq!(x(&single, 2), 15);
    assert_eq!(x(&single, 3), 9);

    let pipelined = ctx.run_pipelined(COUNT_DOWN);
    assert_eq!(px(&pipelined, 2), 15);
    assert_eq!(pipelined.stats().control_flushes, 2);
}

#[test]
fn subroutine_returns_through_link_register() {
    let sim = TestContext::new().run(SUBROUTINE);
    assert_eq!([x(&sim, 1), x(&sim, 2), x(&sim, 3)], [1, 2, 3]);
    assert_eq!(x(&sim, legv8_core::isa::abi::LR), 0x40_0004);
}

#[test]
fn double_precision_values_round_trip_through_memory() {
    let sim = TestContext::new().run(FLOATING_POINT);
    assert_eq!(x(&sim, 5), 4.0_f64.to_bits());
    assert_eq!(x(&sim, 4), 0);
}

#[test]
fn load_address_yields_text_address() {
    let sim = TestContext::new().run(LOAD_ADDRESS);
    assert_eq!(x(&sim, 3), 0x40_0008);
}
