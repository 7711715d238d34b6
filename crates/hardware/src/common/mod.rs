//! Common utilities and types used throughout the LEGv8 simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Segment layout defaults, register counts, and access sizes.
//! 2. **Error Handling:** The parse, decode, and runtime error taxonomy and the
//!    `(message, line)` pairs surfaced to callers.
//! 3. **Register Management:** A unified interface for the X and D/S register files.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for assembly and execution.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{INSTRUCTION_SIZE, NUM_REGISTERS};
pub use error::{AssemblyError, DecodeError, LineError, ParseError, RuntimeFault, Segment};
pub use reg::{RegisterFile, RegisterKind};
