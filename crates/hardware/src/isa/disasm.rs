//! Instruction disassembler.
//!
//! Renders a decoded `Instruction` back to assembly text for the execution
//! log, tracing events, and test diagnostics. Branch targets are shown as
//! text-segment addresses.
//!
//! # Usage
//!
//! ```ignore
//! let text = disassemble(&instruction, TEXT_SEGMENT_OFFSET);
//! assert_eq!(text, "ADDI X1, XZR, #10");
//! ```

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::reg::RegisterKind;
use crate::isa::abi::XZR;
use crate::isa::instruction::Instruction;
use crate::isa::token::Grammar;

/// Returns the assembly name of a register.
fn reg_name(kind: RegisterKind, idx: usize) -> String {
    match kind {
        RegisterKind::X if idx == XZR => "XZR".to_owned(),
        RegisterKind::X => format!("X{idx}"),
        RegisterKind::S => format!("S{idx}"),
        RegisterKind::D => format!("D{idx}"),
    }
}

/// Disassembles one instruction.
///
/// # Arguments
///
/// * `instr` - The decoded instruction.
/// * `text_offset` - Base address of the text segment, for branch targets.
///
/// # Returns
///
/// The instruction in canonical upper-case assembly syntax.
pub fn disassemble(instr: &Instruction, text_offset: u64) -> String {
    let m = instr.mnemonic();
    let form = m.form();
    let r = |i: usize| reg_name(form.class, instr.reg(i));
    let x = |i: usize| reg_name(RegisterKind::X, instr.reg(i));
    let target = |i: usize| format!("0x{:x}", text_offset + instr.arg(i) as u64 * INSTRUCTION_SIZE);

    let operands = match form.grammar {
        Grammar::R => r(0),
        Grammar::Rr => format!("{}, {}", r(0), r(1)),
        Grammar::Rrr => format!("{}, {}, {}", r(0), r(1), r(2)),
        Grammar::Ri => format!("{}, #{}", r(0), instr.arg(1)),
        Grammar::Rri => format!("{}, {}, #{}", r(0), r(1), instr.arg(2)),
        Grammar::Rm => format!("{}, [{}, #{}]", r(0), x(1), instr.arg(2)),
        Grammar::Rrm => format!("{}, {}, [{}, #{}]", r(0), r(1), x(2), instr.arg(3)),
        Grammar::Risi => format!("{}, #{}, LSL #{}", r(0), instr.arg(1), instr.arg(2)),
        Grammar::L => target(0),
        Grammar::Rl => format!("{}, {}", r(0), target(1)),
    };
    format!("{m} {operands}")
}
