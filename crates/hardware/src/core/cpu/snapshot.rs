//! Register state snapshots.
//!
//! The pipeline keeps the state before and after each in-flight instruction so
//! that its visible register file lags execution by the pipeline depth.

use serde::Serialize;

use super::Cpu;
use crate::common::constants::NUM_REGISTERS;
use crate::common::RegisterKind;
use crate::core::arch::flags::Flags;

/// Copy of the X and D register files plus the flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CpuSnapshot {
    /// Integer registers; index 31 is always zero.
    pub x: [u64; NUM_REGISTERS],
    /// Raw bits of the FP registers.
    pub d: [u64; NUM_REGISTERS],
    /// Condition flags.
    pub flags: Flags,
}

impl CpuSnapshot {
    pub(crate) fn capture(cpu: &Cpu) -> Self {
        Self { x: cpu.regs.x_values(), d: cpu.regs.d_values(), flags: cpu.flags }
    }

    /// Reads a register from the snapshot.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which file to read; `S` yields the low 32 bits of the D register.
    /// * `idx` - Register index (0-31).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is 32 or greater.
    pub fn register(&self, kind: RegisterKind, idx: usize) -> u64 {
        match kind {
            RegisterKind::X => self.x[idx],
            RegisterKind::D => self.d[idx],
            RegisterKind::S => self.d[idx] & 0xFFFF_FFFF,
        }
    }
}
