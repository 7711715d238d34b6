//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, a single interface over the
//! integer (X) and floating-point (D/S) register files. It provides:
//! 1. **Unified Storage:** Combined storage for all LEGv8 architectural registers.
//! 2. **Views:** Full-width X and D access plus the low-32-bit S view of the FP file.
//! 3. **Observability:** Register kind dispatch for the read-only presentation interface.

use serde::Serialize;

use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// Which register file (and width) an operand or query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RegisterKind {
    /// 64-bit integer register `X0`-`X30`, `XZR`.
    X,
    /// Single-precision view (low 32 bits) of an FP register.
    S,
    /// Double-precision FP register.
    D,
}

/// Unified register file containing both integer and floating-point registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    fpr: Fpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value from an integer register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). `XZR` (31) always returns 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register.
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes a value to an integer register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `XZR` are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// Reads the raw bits of a double-precision register.
    pub fn read_d(&self, idx: usize) -> u64 {
        self.fpr.read(idx)
    }

    /// Writes the raw bits of a double-precision register.
    pub fn write_d(&mut self, idx: usize, val: u64) {
        self.fpr.write(idx, val);
    }

    /// Reads the single-precision view (low 32 bits) of an FP register.
    pub fn read_s(&self, idx: usize) -> u32 {
        self.fpr.read_single(idx)
    }

    /// Writes the single-precision view of an FP register, keeping the upper half.
    pub fn write_s(&mut self, idx: usize, val: u32) {
        self.fpr.write_single(idx, val);
    }

    /// Reads any register by kind, zero-extended to 64 bits.
    ///
    /// # Arguments
    ///
    /// * `kind` - The register file and view to read.
    /// * `idx` - Register index (0-31).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is 32 or greater.
    pub fn read_kind(&self, kind: RegisterKind, idx: usize) -> u64 {
        match kind {
            RegisterKind::X => self.read(idx),
            RegisterKind::S => u64::from(self.read_s(idx)),
            RegisterKind::D => self.read_d(idx),
        }
    }

    /// Returns a copy of every integer register.
    pub const fn x_values(&self) -> [u64; 32] {
        self.gpr.values()
    }

    /// Returns a copy of every FP register's raw bits.
    pub const fn d_values(&self) -> [u64; 32] {
        self.fpr.values()
    }
}
