//! LEGv8 Floating-Point Register File.
//!
//! This module implements the FP register file. It performs the following:
//! 1. **Storage:** Maintains 32 registers as raw 64-bit IEEE 754 patterns.
//! 2. **Views:** Exposes the full `D` view and the low-32-bit `S` view of each register.

/// Mask selecting the single-precision half of a register.
const SINGLE_MASK: u64 = 0xFFFF_FFFF;

/// Floating-point register file.
///
/// Registers are stored as raw bits so that a NaN payload written through one
/// view is preserved exactly when read back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    fregs: [u64; 32],
}

impl Fpr {
    /// Creates a new floating-point register file with all registers set to `+0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register as raw double-precision bits.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    pub const fn read(&self, idx: usize) -> u64 {
        self.fregs[idx]
    }

    /// Writes raw double-precision bits to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit IEEE 754 pattern.
    pub const fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx] = val;
    }

    /// Reads the single-precision view of a register.
    pub const fn read_single(&self, idx: usize) -> u32 {
        (self.fregs[idx] & SINGLE_MASK) as u32
    }

    /// Writes the single-precision view of a register, leaving the upper half intact.
    pub const fn write_single(&mut self, idx: usize, val: u32) {
        self.fregs[idx] = (self.fregs[idx] & !SINGLE_MASK) | val as u64;
    }

    /// Returns a copy of the register array.
    pub const fn values(&self) -> [u64; 32] {
        self.fregs
    }
}
