use legv8_core::core::pipeline::hazards;
use legv8_core::isa::mnemonic::Mnemonic;
use rstest::rstest;

use crate::common::builder::{executed, pipeline};

#[rstest]
#[case(Mnemonic::Add, &[3, 1, 4], true)]
#[case(Mnemonic::Add, &[3, 4, 1], true)]
#[case(Mnemonic::Add, &[3, 4, 5], false)]
#[case(Mnemonic::Addi, &[3, 1, 8], true)]
#[case(Mnemonic::Stur, &[1, 9, 0], true)]
#[case(Mnemonic::Ldur, &[2, 1, 0], true)]
#[case(Mnemonic::Movz, &[1, 4, 0], false)]
fn load_followed_by_consumer(#[case] m: Mnemonic, #[case] args: &[i64], #[case] stalls: bool) {
    let (stages, regs) = pipeline([
        None,
        executed(m, args),
        executed(Mnemonic::Ldur, &[1, 9, 0]),
        None,
        None,
    ]);
    assert_eq!(hazards::detect(&stages, &regs).load_use_stall, stalls);
}

#[test]
fn only_loads_stall() {
    let (stages, regs) = pipeline([
        None,
        executed(Mnemonic::Add, &[3, 1, 1]),
        executed(Mnemonic::Addi, &[1, 9, 0]),
        None,
        None,
    ]);
    assert!(!hazards::detect(&stages, &regs).load_use_stall);
}

#[test]
fn narrow_and_exclusive_loads_stall() {
    for load in [Mnemonic::Ldurb, Mnemonic::Ldursw, Mnemonic::Ldxr] {
        let (stages, regs) = pipeline([
            None,
            executed(Mnemonic::Add, &[3, 1, 1]),
            executed(load, &[1, 9, 0]),
            None,
            None,
        ]);
        assert!(hazards::detect(&stages, &regs).load_use_stall, "{load}");
    }
}

#[test]
fn floating_point_loads_are_not_tracked() {
    let (stages, regs) = pipeline([
        None,
        executed(Mnemonic::Faddd, &[3, 1, 1]),
        executed(Mnemonic::Ldurd, &[1, 9, 0]),
        None,
        None,
    ]);
    assert!(!hazards::detect(&stages, &regs).load_use_stall);
}
