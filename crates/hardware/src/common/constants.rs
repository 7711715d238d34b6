//! Global Simulator Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Memory Layout:** Default offsets of the text, dynamic data, and stack segments.
//! 2. **Access Sizes:** Byte widths of every data transfer granularity.
//! 3. **Architectural Sizes:** Register counts, instruction size, and pipeline depth.

/// Default base address of the text segment; instruction `i` lives at `TEXT + 4 * i`.
pub const TEXT_SEGMENT_OFFSET: u64 = 0x0040_0000;

/// Default lowest valid data address (start of the heap).
pub const DYNAMIC_DATA_OFFSET: u64 = 0x1000_0000;

/// Default exclusive upper bound of the stack; also the initial stack pointer.
pub const STACK_BASE: u64 = 0x80_0000_0000;

/// Size of one encoded instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Number of architectural registers per register file.
pub const NUM_REGISTERS: usize = 32;

/// Required alignment of SP for SP-based data transfers.
pub const SP_ALIGNMENT: u64 = 16;

/// Number of stages in the pipeline model (IF, ID, EX, MEM, WB).
pub const PIPELINE_DEPTH: usize = 5;

/// Byte width of a doubleword access.
pub const DOUBLEWORD: u64 = 8;

/// Byte width of a word access.
pub const WORD: u64 = 4;

/// Byte width of a halfword access.
pub const HALFWORD: u64 = 2;

/// Byte width of a byte access.
pub const BYTE: u64 = 1;

/// Width in bits of the field moved by `MOVZ`/`MOVK`.
pub const WIDE_IMMEDIATE_BITS: u32 = 16;
