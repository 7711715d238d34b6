//! LEGv8 Integer Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`X0`-`X30`, `XZR`).
//! 2. **Invariant Enforcement:** Ensures that `XZR` reads as zero and ignores writes.
//! 3. **Snapshots:** Exposes a copy of the register array for deferred write-back.

use crate::isa::abi::XZR;

/// Integer register file.
///
/// Contains 32 registers. Index 31 is `XZR`, hardwired to zero. `SP`, `FP`,
/// and `LR` are ordinary storage at indices 28, 29, and 30.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; 32],
}

impl Gpr {
    /// Creates a new integer register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an integer register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register. `XZR` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == XZR { 0 } else { self.regs[idx] }
    }

    /// Writes a value to an integer register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write. Ignored for `XZR`.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != XZR {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of the register array.
    pub const fn values(&self) -> [u64; 32] {
        self.regs
    }
}
