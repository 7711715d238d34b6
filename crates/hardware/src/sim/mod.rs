//! Simulation front ends.
//!
//! Ties assembly and execution together. It provides:
//! 1. **Program:** Whole-source assembly with label binding and error collection.
//! 2. **Single-cycle mode:** One instruction per step against the CPU.
//! 3. **Pipelined mode:** One clock per step through the five-stage pipeline.
//!
//! Both simulators are built only from a program without compile errors and
//! stop at the first runtime fault, which stays reported on every later step.

/// Whole-program assembly.
pub mod program;

/// Five-stage pipelined execution mode.
pub mod pipelined;

/// Single-cycle execution mode.
pub mod single_cycle;

pub use pipelined::PipelinedSimulator;
pub use program::{Program, SourceLine};
pub use single_cycle::{SingleCycleSimulator, StepOutcome};
