//! Floating-Point Unit (FPU).
//!
//! This module implements the floating-point arithmetic of the `FADD`,
//! `FSUB`, `FMUL`, `FDIV`, and `FCMP` families in single and double
//! precision. Arithmetic follows IEEE 754 round-to-nearest as provided by
//! the host; comparisons map the IEEE ordering onto the NZCV flags.

use std::cmp::Ordering;

use crate::core::arch::flags::Flags;

/// Floating-point arithmetic operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

/// Floating-Point Unit.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a double-precision operation on raw register bits.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand as an IEEE 754 binary64 pattern.
    /// * `b`  - Second operand as an IEEE 754 binary64 pattern.
    ///
    /// # Returns
    ///
    /// The result as a binary64 pattern.
    pub fn execute_double(op: FpOp, a: u64, b: u64) -> u64 {
        let (a, b) = (f64::from_bits(a), f64::from_bits(b));
        let r = match op {
            FpOp::Add => a + b,
            FpOp::Sub => a - b,
            FpOp::Mul => a * b,
            FpOp::Div => a / b,
        };
        r.to_bits()
    }

    /// Executes a single-precision operation on raw register bits.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand as an IEEE 754 binary32 pattern.
    /// * `b`  - Second operand as an IEEE 754 binary32 pattern.
    ///
    /// # Returns
    ///
    /// The result as a binary32 pattern.
    pub fn execute_single(op: FpOp, a: u32, b: u32) -> u32 {
        let (a, b) = (f32::from_bits(a), f32::from_bits(b));
        let r = match op {
            FpOp::Add => a + b,
            FpOp::Sub => a - b,
            FpOp::Mul => a * b,
            FpOp::Div => a / b,
        };
        r.to_bits()
    }

    /// Compares two double-precision values.
    pub fn compare_double(a: u64, b: u64) -> Flags {
        compare_flags(f64::from_bits(a).partial_cmp(&f64::from_bits(b)))
    }

    /// Compares two single-precision values.
    pub fn compare_single(a: u32, b: u32) -> Flags {
        compare_flags(f32::from_bits(a).partial_cmp(&f32::from_bits(b)))
    }
}

/// Maps an IEEE ordering onto NZCV.
///
/// | ordering  | N | Z | C | V |
/// |-----------|---|---|---|---|
/// | less      | 1 | 0 | 0 | 0 |
/// | equal     | 0 | 1 | 1 | 0 |
/// | greater   | 0 | 0 | 1 | 0 |
/// | unordered | 0 | 0 | 1 | 1 |
const fn compare_flags(ordering: Option<Ordering>) -> Flags {
    match ordering {
        Some(Ordering::Less) => Flags::new(true, false, false, false),
        Some(Ordering::Equal) => Flags::new(false, true, true, false),
        Some(Ordering::Greater) => Flags::new(false, false, true, false),
        None => Flags::new(false, false, true, true),
    }
}
