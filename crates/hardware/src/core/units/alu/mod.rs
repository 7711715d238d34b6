//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 64-bit integer ALU. It handles arithmetic,
//! bitwise logic, and shifts, and derives the NZCV flags for the
//! flag-setting variants.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Smulh, Umulh, Sdiv, Udiv and the add/sub flag formulas
//! - [`logic`]:      And, Orr, Eor and the logical flag rule
//! - [`shifts`]:     Lsl, Lsr

/// Integer arithmetic operations and their flags.
pub mod arithmetic;

/// Bitwise logical operations and their flags.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::core::arch::flags::Flags;
use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount)
    ///
    /// # Returns
    ///
    /// The 64-bit result.
    ///
    /// # Examples
    ///
    /// ```
    /// use legv8_core::core::units::alu::Alu;
    /// use legv8_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Sub, 5, 6), u64::MAX);
    /// assert_eq!(Alu::execute(AluOp::Lsl, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Sdiv, -9_i64 as u64, 2), -4_i64 as u64);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Smulh
            | AluOp::Umulh
            | AluOp::Sdiv
            | AluOp::Udiv => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Orr | AluOp::Eor => logic::execute(op, a, b),
            AluOp::Lsl | AluOp::Lsr => shifts::execute(op, a, b),
        }
    }

    /// Executes a flag-setting operation.
    ///
    /// # Returns
    ///
    /// The result and the flags it produces. Only `Add`, `Sub`, and `And`
    /// have flag-setting forms; any other operation reports the flags of its
    /// result as a logical operation.
    pub fn execute_with_flags(op: AluOp, a: u64, b: u64) -> (u64, Flags) {
        let result = Self::execute(op, a, b);
        let flags = match op {
            AluOp::Add => arithmetic::add_flags(a, b, result),
            AluOp::Sub => arithmetic::sub_flags(a, b, result),
            _ => logic::logic_flags(result),
        };
        (result, flags)
    }
}
