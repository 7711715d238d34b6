use legv8_core::core::pipeline::hazards;
use legv8_core::isa::mnemonic::Mnemonic;
use rstest::rstest;

use crate::common::builder::{executed, pipeline, taken};

#[test]
fn unconditional_branch_always_flushes() {
    let (stages, _) = pipeline([None, executed(Mnemonic::B, &[0]), None, None, None]);
    assert!(hazards::control_hazard(stages[1].as_ref()));
}

#[rstest]
#[case(Mnemonic::BEq, &[4])]
#[case(Mnemonic::Cbz, &[1, 4])]
#[case(Mnemonic::Cbnz, &[1, 4])]
fn taken_branches_flush(#[case] m: Mnemonic, #[case] args: &[i64]) {
    assert!(hazards::control_hazard(taken(m, args).as_ref()));
    assert!(!hazards::control_hazard(executed(m, args).as_ref()));
}

#[rstest]
#[case(Mnemonic::Bl, &[4])]
#[case(Mnemonic::Br, &[30])]
fn link_and_register_branches_never_flush(#[case] m: Mnemonic, #[case] args: &[i64]) {
    assert!(!hazards::control_hazard(taken(m, args).as_ref()));
    assert!(!hazards::control_hazard(executed(m, args).as_ref()));
}

#[test]
fn non_branches_never_flush() {
    assert!(!hazards::control_hazard(taken(Mnemonic::Lda, &[1, 4]).as_ref()));
    assert!(!hazards::control_hazard(executed(Mnemonic::Add, &[1, 2, 3]).as_ref()));
    assert!(!hazards::control_hazard(None));
}

#[test]
fn flag_producer_in_execute_stalls_conditional_branch() {
    let (stages, regs) = pipeline([
        None,
        executed(Mnemonic::BEq, &[4]),
        executed(Mnemonic::Subs, &[31, 1, 2]),
        None,
        None,
    ]);
    assert!(hazards::flag_hazard(&stages));
    assert!(hazards::detect(&stages, &regs).branch_stall());
}

#[test]
fn flag_producer_in_memory_stalls_conditional_branch() {
    let (stages, _) = pipeline([
        None,
        executed(Mnemonic::BNe, &[4]),
        None,
        executed(Mnemonic::Fcmpd, &[1, 2]),
        None,
    ]);
    assert!(hazards::flag_hazard(&stages));
}

#[test]
fn memory_stage_answer_replaces_execute_answer() {
    let (stages, _) = pipeline([
        None,
        executed(Mnemonic::BEq, &[4]),
        executed(Mnemonic::Subs, &[31, 1, 2]),
        executed(Mnemonic::Add, &[1, 2, 3]),
        None,
    ]);
    assert!(!hazards::flag_hazard(&stages));
}

#[test]
fn unconditional_branch_ignores_flags() {
    let (stages, _) = pipeline([
        None,
        executed(Mnemonic::B, &[4]),
        executed(Mnemonic::Subs, &[31, 1, 2]),
        None,
        None,
    ]);
    assert!(!hazards::flag_hazard(&stages));
}

#[rstest]
#[case(Mnemonic::Addi, &[1, 31, 5], true)]
#[case(Mnemonic::Addi, &[2, 31, 5], false)]
#[case(Mnemonic::Stur, &[1, 9, 0], false)]
#[case(Mnemonic::Movz, &[1, 5, 0], true)]
fn compare_branch_waits_for_tested_register_in_execute(
    #[case] m: Mnemonic,
    #[case] args: &[i64],
    #[case] stalls: bool,
) {
    let (stages, regs) =
        pipeline([None, executed(Mnemonic::Cbz, &[1, 4]), executed(m, args), None, None]);
    assert_eq!(
        hazards::branch_register_hazard(stages[1].as_ref(), &regs.id_ex, &regs.ex_mem),
        stalls
    );
}

#[test]
fn compare_branch_waits_for_tested_register_in_memory() {
    let (stages, regs) = pipeline([
        None,
        executed(Mnemonic::Cbnz, &[1, 4]),
        None,
        executed(Mnemonic::Ldur, &[1, 9, 0]),
        None,
    ]);
    assert!(hazards::detect(&stages, &regs).branch_register_stall);
}

#[test]
fn load_address_is_in_the_compare_branch_group() {
    let (stages, regs) = pipeline([
        None,
        executed(Mnemonic::Lda, &[1, 4]),
        executed(Mnemonic::Addi, &[1, 31, 5]),
        None,
        None,
    ]);
    assert!(hazards::detect(&stages, &regs).branch_register_stall);
}
