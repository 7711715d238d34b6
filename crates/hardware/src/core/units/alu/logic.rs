//! ALU logical operations.
//!
//! Implements bitwise AND, OR, and exclusive OR over the full 64 bits, and
//! the flag rule of `ANDS`/`ANDIS`.

use crate::core::arch::flags::Flags;
use crate::core::pipeline::signals::AluOp;

/// Executes a logical operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-logic opcodes.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        AluOp::Orr => a | b,
        AluOp::Eor => a ^ b,
        _ => 0,
    }
}

/// Flags of a logical result: N and Z from the value, C and V always clear.
pub const fn logic_flags(r: u64) -> Flags {
    Flags { n: (r as i64) < 0, z: r == 0, c: false, v: false }
}
