//! LEGv8 instruction set simulator library.
//!
//! This crate assembles and executes programs for LEGv8, the ARMv8-derived teaching
//! instruction set, with the following:
//! 1. **ISA:** Lexer, parser state machine, decoder, mnemonic table, and disassembler.
//! 2. **Core:** Single-cycle CPU, integer ALU, FPU, exclusive monitor, and the
//!    five-stage pipeline with hazard detection and forwarding.
//! 3. **Memory:** Sparse, segment-checked, big-endian data memory.
//! 4. **Simulation:** Program assembly, single-cycle and pipelined front ends,
//!    configuration, and statistics collection.

/// Common types and constants (errors, register files, segment layout).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (arch state, execution units, single-cycle CPU, pipeline).
pub mod core;
/// Instruction set (tokens, lexer, parser, mnemonics, decode, disassembly).
pub mod isa;
/// Segment-checked data memory.
pub mod memory;
/// Program assembly and the two execution modes.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Single-cycle CPU; holds registers, flags, and the exclusive monitor.
pub use crate::core::Cpu;
/// Assembled program with its label table and compile errors.
pub use crate::sim::Program;
/// Five-stage pipelined simulator.
pub use crate::sim::PipelinedSimulator;
/// One-instruction-per-step simulator.
pub use crate::sim::SingleCycleSimulator;
