use legv8_core::common::error::LineError;
use legv8_core::isa::abi::LR;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{TestContext, x};

fn conditional(cond: &str, a: u64, b: u64) -> String {
    format!(
        "ADDI X1, XZR, #{a}\nADDI X2, XZR, #{b}\nCMP X1, X2\nB.{cond} skip\n\
         ADDI X3, XZR, #1\nskip: ADDI X4, XZR, #1"
    )
}

#[rstest]
#[case("EQ", 5, 5, true, true)]
#[case("EQ", 5, 6, false, false)]
#[case("NE", 5, 6, true, true)]
#[case("HS", 5, 5, true, true)]
#[case("LO", 1, 2, true, true)]
#[case("HI", 3, 2, true, true)]
#[case("LS", 2, 2, true, true)]
#[case("GE", 2, 2, true, true)]
#[case("LT", 1, 2, true, false)]
#[case("LT", 2, 1, false, false)]
#[case("GT", 3, 2, true, true)]
#[case("LE", 3, 2, false, false)]
#[case("MI", 1, 2, true, true)]
#[case("PL", 2, 1, true, true)]
#[case("VS", 1, 2, false, false)]
#[case("VC", 1, 2, true, true)]
fn conditional_branches(
    #[case] cond: &str,
    #[case] a: u64,
    #[case] b: u64,
    #[case] jumps: bool,
    #[case] published: bool,
) {
    let mut sim = TestContext::new().single_cycle(&conditional(cond, a, b));
    for _ in 0..4 {
        let _ = sim.step().expect("step succeeds");
    }
    assert_eq!(sim.branch_taken(), published, "B.{cond} with {a}, {b}");
    let _ = sim.run().expect("program finishes");
    assert_eq!(x(&sim, 3), u64::from(!jumps));
    assert_eq!(x(&sim, 4), 1);
}

#[rstest]
#[case("CBZ", 0, true)]
#[case("CBZ", 7, false)]
#[case("CBNZ", 7, true)]
#[case("CBNZ", 0, false)]
fn compare_branches(#[case] mnemonic: &str, #[case] value: u64, #[case] taken: bool) {
    let source = format!(
        "ADDI X1, XZR, #{value}\n{mnemonic} X1, skip\nADDI X3, XZR, #1\nskip: ADDI X4, XZR, #1"
    );
    let mut sim = TestContext::new().single_cycle(&source);
    let _ = sim.step().expect("step succeeds");
    let _ = sim.step().expect("step succeeds");
    assert_eq!(sim.branch_taken(), taken);
    let _ = sim.run().expect("program finishes");
    assert_eq!(x(&sim, 3), u64::from(!taken));
}

#[test]
fn branch_and_link_returns_through_register() {
    let source = "\
BL func
ADDI X2, XZR, #2
B end
func: ADDI X1, XZR, #1
BR LR
end: ADD X3, X1, X2";
    let mut sim = TestContext::new().single_cycle(source);
    let _ = sim.step().expect("BL executes");
    assert!(!sim.branch_taken());
    assert_eq!(sim.instruction_index(), 3);
    assert_eq!(x(&sim, LR), 0x40_0004);

    let _ = sim.run().expect("program finishes");
    assert_eq!(x(&sim, 3), 3);
}

#[test]
fn conditional_loop_counts_down() {
    let source = "\
ADDI X1, XZR, #5
loop: SUBIS X1, X1, #1
B.NE loop
ADDI X2, XZR, #9";
    let mut sim = TestContext::new().single_cycle(source);
    let steps = sim.run().expect("loop terminates");
    assert_eq!(steps, 1 + 5 * 2 + 1);
    assert_eq!(x(&sim, 1), 0);
    assert_eq!(x(&sim, 2), 9);
}

#[rstest]
#[case("ADDI X1, XZR, #2\nBR X1", "The address 0x2 is not word aligned.")]
#[case("ADDI X1, XZR, #4\nBR X1", "Memory address out of bounds: 0x4 is not in the text segment")]
#[case(
    "MOVZ X1, #0x50, LSL #16\nBR X1",
    "Memory address out of bounds: 0x500000 is not in the text segment"
)]
#[case(
    "MOVZ X1, #0x40, LSL #16\nADDI X1, X1, #12\nBR X1",
    "Memory address out of bounds: 0x40000c is not in the text segment"
)]
fn branch_register_faults(#[case] source: &str, #[case] message: &str) {
    let mut sim = TestContext::new().single_cycle(source);
    let err = sim.run().expect_err("BR faults");
    let line = source.lines().count() - 1;
    assert_eq!(err, LineError { message: message.to_owned(), line });
}
