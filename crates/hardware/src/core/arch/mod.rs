//! LEGv8 architectural state.
//!
//! This module contains the architecturally visible storage of the core.
//! It includes the following modules:
//! 1. **FPRs:** Floating-point register file with D and S views.
//! 2. **GPRs:** Integer register file with the hardwired `XZR`.
//! 3. **Flags:** The N, Z, C, V condition flags and the branch condition table.

/// Condition flags and branch conditions.
pub mod flags;

/// Floating-point register file implementation.
pub mod fpr;

/// Integer register file implementation.
pub mod gpr;
