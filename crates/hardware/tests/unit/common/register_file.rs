use legv8_core::common::{RegisterFile, RegisterKind};
use legv8_core::isa::abi::XZR;
use proptest::prelude::*;

#[test]
fn single_view_is_low_half_of_double() {
    let mut regs = RegisterFile::new();
    regs.write_d(1, 0x1122_3344_5566_7788);
    assert_eq!(regs.read_s(1), 0x5566_7788);
    assert_eq!(regs.read_kind(RegisterKind::S, 1), 0x5566_7788);

    regs.write_s(1, 0xAABB_CCDD);
    assert_eq!(regs.read_d(1), 0x1122_3344_AABB_CCDD);
}

#[test]
fn fp_register_31_is_ordinary() {
    let mut regs = RegisterFile::new();
    regs.write_d(31, 7);
    assert_eq!(regs.read_kind(RegisterKind::D, 31), 7);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn reading_past_the_last_register_panics() {
    let regs = RegisterFile::new();
    let _ = regs.read_kind(RegisterKind::X, 32);
}

proptest! {
    #[test]
    fn x_registers_hold_their_value(idx in 0usize..31, val in any::<u64>()) {
        let mut regs = RegisterFile::new();
        regs.write(idx, val);
        prop_assert_eq!(regs.read(idx), val);
        prop_assert_eq!(regs.x_values()[idx], val);
    }

    #[test]
    fn zero_register_discards_writes(val in any::<u64>()) {
        let mut regs = RegisterFile::new();
        regs.write(XZR, val);
        prop_assert_eq!(regs.read(XZR), 0);
    }
}
