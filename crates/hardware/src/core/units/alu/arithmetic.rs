//! ALU arithmetic operations.
//!
//! Implements 64-bit addition, subtraction, multiplication (low and high
//! halves), and division, plus the NZCV flag formulas of the add/subtract
//! family. All arithmetic wraps modulo 2^64.

use crate::core::arch::flags::Flags;
use crate::core::pipeline::signals::AluOp;

/// Number of bits in a register (used for high-multiply shift).
const XLEN_BITS: u32 = 64;

/// Shift that moves the sign bit to bit 0.
const SIGN_SHIFT: u32 = XLEN_BITS - 1;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result. Division by zero yields 0. Returns `0` for
/// non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Smulh => {
            let product = i128::from(a as i64) * i128::from(b as i64);
            (product >> XLEN_BITS) as u64
        }
        AluOp::Umulh => {
            let product = u128::from(a) * u128::from(b);
            (product >> XLEN_BITS) as u64
        }
        AluOp::Sdiv => {
            if b == 0 {
                0
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            }
        }
        AluOp::Udiv => a.checked_div(b).unwrap_or(0),
        _ => 0,
    }
}

/// Computes the flags of `r = a + b`.
///
/// * N: bit 63 of the result.
/// * Z: the result is zero.
/// * C: carry out of bit 63.
/// * V: the operands share a sign that the result does not.
pub const fn add_flags(a: u64, b: u64, r: u64) -> Flags {
    Flags {
        n: (r >> SIGN_SHIFT) == 1,
        z: r == 0,
        c: (((a & b) | ((a | b) & !r)) >> SIGN_SHIFT) == 1,
        v: (((a ^ !b) & (a ^ r)) >> SIGN_SHIFT) == 1,
    }
}

/// Computes the flags of `r = a - b`.
///
/// Uses the addition formula with the two's complement of `b`, so `C` is
/// the carry of `a + (-b)`. A subtrahend of zero therefore clears `C`.
pub const fn sub_flags(a: u64, b: u64, r: u64) -> Flags {
    add_flags(a, (!b).wrapping_add(1), r)
}
