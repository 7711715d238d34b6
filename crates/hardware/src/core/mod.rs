//! Core processor implementation.
//!
//! This module contains the single-cycle CPU, the five-stage pipeline built on
//! top of it, the execution units, and the architectural register and flag state.

/// Architecture-specific components (register files, condition flags).
pub mod arch;

/// Single-cycle CPU and instruction execution.
pub mod cpu;

/// Instruction pipeline implementation (engine, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, FPU, exclusive monitor).
pub mod units;

pub use self::cpu::Cpu;
