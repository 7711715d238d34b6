//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The clocked IF/ID/EX/MEM/WB slot buffer.
//! 2. **Hazards:** Detection of stalls, flushes, and forwarding paths.
//! 3. **Latches:** In-flight instruction records and the four pipeline registers.
//! 4. **Signals:** Control words bound to each instruction at decode.

/// Pipeline clocking and architectural visibility.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline registers (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals bound to instructions during decode.
pub mod signals;

pub use engine::Pipeline;
