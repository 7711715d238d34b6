//! Execution units and functional components.
//!
//! This module contains the functional units used by the execute logic:
//! the integer ALU, the floating-point unit, and the load/store unit's
//! exclusive access monitor.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Floating-Point Unit for IEEE 754 operations.
pub mod fpu;

/// Load/Store Unit state for exclusive access.
pub mod lsu;
