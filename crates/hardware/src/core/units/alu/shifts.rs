//! ALU shift operations.
//!
//! Implements logical shifts left and right. The shift amount is taken
//! modulo 64; the decoder already limits immediates to 0-63.

use crate::core::pipeline::signals::AluOp;

/// Mask applied to the shift amount.
const SHAMT_MASK: u64 = 0x3F;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - `Lsl` or `Lsr`.
/// * `a`  - Value to shift.
/// * `b`  - Shift amount.
///
/// # Returns
///
/// The shifted value. Returns `0` for non-shift opcodes.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let shamt = (b & SHAMT_MASK) as u32;
    match op {
        AluOp::Lsl => a << shamt,
        AluOp::Lsr => a >> shamt,
        _ => 0,
    }
}
