use legv8_core::core::arch::flags::Condition;
use legv8_core::core::pipeline::signals::ControlSignals;
use legv8_core::isa::mnemonic::Mnemonic;
use legv8_core::isa::token::TokenType;
use rstest::rstest;

#[rstest]
#[case("ADD", Mnemonic::Add)]
#[case("add", Mnemonic::Add)]
#[case("b.eq", Mnemonic::BEq)]
#[case("B.VC", Mnemonic::BVc)]
#[case("LDURSW", Mnemonic::Ldursw)]
#[case("fcmpd", Mnemonic::Fcmpd)]
fn parses_either_case(#[case] text: &str, #[case] expected: Mnemonic) {
    assert_eq!(text.parse::<Mnemonic>(), Ok(expected));
}

#[test]
fn mixed_case_is_not_a_mnemonic() {
    let err = "Add".parse::<Mnemonic>().expect_err("mixed case is rejected");
    assert_eq!(err.to_string(), "Add instruction mnemonic does not exist in LEGv8");
}

#[test]
fn catalog_is_consistent() {
    for m in Mnemonic::ALL {
        assert!(m.token_type().is_mnemonic(), "{m} has a non-mnemonic class");
        assert_eq!(m.name().parse::<Mnemonic>(), Ok(m));
        assert_eq!(m.condition().is_some(), m.name().starts_with("B."), "{m}");
    }
}

#[test]
fn metadata_of_selected_mnemonics() {
    assert_eq!(Mnemonic::B.opcode(), Some("000101"));
    assert_eq!(Mnemonic::Lda.opcode(), None);
    assert_eq!(Mnemonic::Sub.alu_control(), Some("0110"));
    assert_eq!(Mnemonic::BLt.condition(), Some(Condition::Lt));
    assert_eq!(Mnemonic::Stxr.token_type(), TokenType::XMnemonicRrm);
    assert!(Mnemonic::Fcmps.sets_flags());
    assert!(!Mnemonic::Add.sets_flags());
    assert!(Mnemonic::Br.is_branch());
    assert!(!Mnemonic::Lda.is_branch());
    assert!(Mnemonic::Ldurs.is_float());
}

#[rstest]
#[case(Mnemonic::Add, ControlSignals::RRR)]
#[case(Mnemonic::Adds, ControlSignals::RRR_FLAGS)]
#[case(Mnemonic::Lsl, ControlSignals::RRI)]
#[case(Mnemonic::Subis, ControlSignals::RRI_FLAGS)]
#[case(Mnemonic::Ldurb, ControlSignals::LOAD)]
#[case(Mnemonic::Sturd, ControlSignals::STORE)]
#[case(Mnemonic::Stxr, ControlSignals::STORE_EXCLUSIVE)]
#[case(Mnemonic::Movk, ControlSignals::WIDE_IMMEDIATE)]
#[case(Mnemonic::B, ControlSignals::BRANCH)]
#[case(Mnemonic::BGe, ControlSignals::COND_BRANCH)]
#[case(Mnemonic::Cbnz, ControlSignals::COMPARE_BRANCH)]
#[case(Mnemonic::Bl, ControlSignals::BRANCH_LINK)]
#[case(Mnemonic::Fcmpd, ControlSignals::FP_COMPARE)]
#[case(Mnemonic::Fmuls, ControlSignals::RRR)]
fn control_words(#[case] m: Mnemonic, #[case] expected: ControlSignals) {
    assert_eq!(ControlSignals::for_mnemonic(m), expected);
}

#[test]
fn alu_op_renders_as_two_bits() {
    assert_eq!(ControlSignals::LOAD.alu_op_bits(), "00");
    assert_eq!(ControlSignals::COMPARE_BRANCH.alu_op_bits(), "01");
    assert_eq!(ControlSignals::RRR.alu_op_bits(), "10");
    assert_eq!(ControlSignals::BRANCH.alu_op_bits(), "");
}
