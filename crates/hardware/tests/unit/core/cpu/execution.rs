use legv8_core::common::RegisterKind;
use legv8_core::common::RuntimeFault;
use legv8_core::common::constants::STACK_BASE;
use legv8_core::config::Config;
use legv8_core::core::arch::flags::Flags;
use legv8_core::core::cpu::Cpu;
use legv8_core::isa::abi::{SP, XZR};
use legv8_core::isa::mnemonic::Mnemonic;
use legv8_core::memory::Memory;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instr;
use crate::common::harness::{TestContext, x};

#[test]
fn immediate_arithmetic_chain() {
    let sim = TestContext::new().run("ADDI X1, XZR, #10\nSUBI X2, X1, #3\nADD X3, X1, X2");
    assert_eq!((x(&sim, 1), x(&sim, 2), x(&sim, 3)), (10, 7, 17));
}

#[rstest]
#[case("ADDI X1, XZR, #12\nADDI X2, XZR, #5\nMUL X3, X1, X2", 60)]
#[case("ADDI X1, XZR, #12\nADDI X2, XZR, #5\nUDIV X3, X1, X2", 2)]
#[case("SUBI X1, XZR, #12\nADDI X2, XZR, #5\nSDIV X3, X1, X2", -2i64 as u64)]
#[case("ADDI X1, XZR, #12\nSDIV X3, X1, XZR", 0)]
#[case("SUBI X1, XZR, #1\nADDI X2, XZR, #2\nUMULH X3, X1, X2", 1)]
#[case("SUBI X1, XZR, #1\nADDI X2, XZR, #2\nSMULH X3, X1, X2", u64::MAX)]
#[case("ADDI X1, XZR, #12\nANDI X3, X1, #10", 8)]
#[case("ADDI X1, XZR, #12\nORRI X3, X1, #3", 15)]
#[case("ADDI X1, XZR, #12\nEORI X3, X1, #10", 6)]
#[case("ADDI X1, XZR, #3\nLSL X3, X1, #4", 48)]
#[case("ADDI X1, XZR, #48\nLSR X3, X1, #4", 3)]
#[case("ADDI X2, XZR, #9\nMOV X3, X2", 9)]
#[case("MOVZ X3, #0x1234, LSL #16", 0x1234_0000)]
#[case("MOVZ X3, #0x1234, LSL #16\nMOVK X3, #0xABCD", 0x1234_ABCD)]
#[case("MOVZ X3, #0xFFFF\nMOVK X3, #1", 1)]
#[case("MOVZ X3, #1, LSL #48", 1 << 48)]
#[case("MOVZ X3, #7\nMOVK X3, #0xFFFF, LSL #48", 0xFFFF_0000_0000_0007)]
fn integer_results(#[case] source: &str, #[case] expected: u64) {
    let sim = TestContext::new().run(source);
    assert_eq!(x(&sim, 3), expected);
}

#[test]
fn flag_setting_forms_update_nzcv() {
    let ctx = TestContext::new();

    let sim = ctx.run("ADDIS X1, XZR, #0");
    assert_eq!(sim.flags(), Flags::new(false, true, false, false));
    assert!(sim.cpu_log().contains("Set flags"));

    let sim = ctx.run("ADDI X1, XZR, #5\nADDI X2, XZR, #5\nCMP X1, X2");
    assert_eq!(sim.flags(), Flags::new(false, true, true, false));

    let sim = ctx.run("SUBI X1, XZR, #1\nANDS X2, X1, X1");
    assert_eq!(sim.flags(), Flags::new(true, false, false, false));

    let sim = ctx.run("ADDI X1, XZR, #5\nADD X2, X1, X1");
    assert_eq!(sim.flags(), Flags::default());
}

#[test]
fn compare_writes_only_flags() {
    let sim = TestContext::new().run("ADDI X1, XZR, #3\nCMPI X1, #4");
    assert_eq!(sim.flags(), Flags::new(true, false, false, false));
    assert_eq!(x(&sim, XZR), 0);
    assert_eq!(x(&sim, 1), 3);
}

#[test]
fn zero_register_ignores_writes() {
    let sim = TestContext::new().run("ADDI XZR, XZR, #5\nADD X1, XZR, XZR");
    assert_eq!(x(&sim, XZR), 0);
    assert_eq!(x(&sim, 1), 0);
    assert!(sim.cpu_log().contains("Ignored attempted assignment to XZR."));
}

#[test]
fn load_address_yields_text_address() {
    let sim = TestContext::new().run("LDA X1, target\nADD X2, X2, X2\ntarget: ADD X3, X3, X3");
    assert_eq!(x(&sim, 1), 0x40_0008);
}

#[test]
fn stack_pointer_starts_at_stack_base() {
    let sim = TestContext::new().single_cycle("ADD X1, X1, X1");
    assert_eq!(x(&sim, SP), STACK_BASE);

    let custom = TestContext::new()
        .with_config(|c| c.memory.initial_sp_override = Some(0x7F_0000_0000))
        .single_cycle("ADD X1, X1, X1");
    assert_eq!(x(&custom, SP), 0x7F_0000_0000);
}

#[test]
fn log_records_disassembly() {
    let sim = TestContext::new().run("ADDI X1, XZR, #10\nB done\ndone: SUB X2, X1, X1");
    let log = sim.cpu_log();
    assert!(log.contains("ADDI X1, XZR, #10"));
    assert!(log.contains("B 0x400008"));
    assert!(log.contains("SUB X2, X1, X1"));
}

const DOUBLE_PROGRAM: &str = "\
MOVZ X1, #0x4000, LSL #48
MOVZ X9, #0x1000, LSL #16
STUR X1, [X9, #0]
LDURD D1, [X9, #0]
FADDD D2, D1, D1
FMULD D3, D1, D2
FDIVD D4, D2, D1
FSUBD D5, D1, D2
STURD D3, [X9, #8]
LDUR X6, [X9, #8]
FCMPD D1, D2";

#[test]
fn double_precision_datapath() {
    let sim = TestContext::new().run(DOUBLE_PROGRAM);
    let d = |i| sim.register(RegisterKind::D, i);
    assert_eq!(d(1), 2.0f64.to_bits());
    assert_eq!(d(2), 4.0f64.to_bits());
    assert_eq!(d(3), 8.0f64.to_bits());
    assert_eq!(d(4), 2.0f64.to_bits());
    assert_eq!(d(5), (-2.0f64).to_bits());
    assert_eq!(x(&sim, 6), 8.0f64.to_bits());
    assert_eq!(sim.flags(), Flags::new(true, false, false, false));
}

const SINGLE_PROGRAM: &str = "\
MOVZ X1, #0x3F80, LSL #16
MOVZ X9, #0x1000, LSL #16
STURW X1, [X9, #0]
LDURS S1, [X9, #0]
FADDS S2, S1, S1
STURS S2, [X9, #8]
LDURSW X3, [X9, #8]
FCMPS S2, S1";

#[test]
fn single_precision_datapath() {
    let sim = TestContext::new().run(SINGLE_PROGRAM);
    assert_eq!(sim.register(RegisterKind::S, 1), u64::from(1.0f32.to_bits()));
    assert_eq!(sim.register(RegisterKind::S, 2), 0x4000_0000);
    assert_eq!(sim.register(RegisterKind::D, 2), 0x4000_0000);
    assert_eq!(x(&sim, 3), 0x4000_0000);
    assert_eq!(sim.flags(), Flags::new(false, false, true, false));
}

#[rstest]
#[case(Mnemonic::Cmp, &[1, 2], "CMP")]
#[case(Mnemonic::Cmpi, &[1, 3], "CMPI")]
#[case(Mnemonic::Mov, &[1, 2], "MOV")]
fn pseudo_instructions_must_be_decoded_first(
    #[case] m: Mnemonic,
    #[case] args: &[i64],
    #[case] name: &str,
) {
    let config = Config::default();
    let mut cpu = Cpu::new(&config);
    let mut memory = Memory::new(&config.memory, 1);
    let err = cpu.execute(&instr(m, args), &mut memory).expect_err("pseudo-instruction faults");
    assert_eq!(err.to_string(), format!("Pseudo-instruction '{name}' cannot be executed directly"));
    assert!(matches!(err, RuntimeFault::Undecoded(_)));
    assert_eq!(cpu.flags, Flags::default());
}
