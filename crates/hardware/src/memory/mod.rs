//! Data memory.
//!
//! This module models the byte-addressable data memory of the simulator. It provides:
//! 1. **Sparse Storage:** Only written bytes are stored; every other address reads 0.
//! 2. **Segment Bounds:** Data accesses must lie entirely inside
//!    `[dynamic data offset, stack base)`, else a segment fault is raised.
//! 3. **Granularities:** Byte, halfword, word (plus sign-extending word load), and
//!    doubleword accesses, all big-endian through `ByteBuffer`.
//!
//! Alignment is not checked here; SP and PC alignment belong to the CPU.

/// Big-endian staging buffer.
pub mod buffer;

use std::collections::HashMap;

use tracing::trace;

use crate::common::constants::{BYTE, DOUBLEWORD, HALFWORD, INSTRUCTION_SIZE, WORD};
use crate::common::error::{RuntimeFault, Segment};
use crate::config::MemoryConfig;

pub use buffer::ByteBuffer;

/// Sparse, segment-bounded data memory.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: HashMap<u64, u8>,
    text_segment_offset: u64,
    static_data_offset: u64,
    dynamic_data_offset: u64,
    stack_base: u64,
}

impl Memory {
    /// Creates an empty memory for a program.
    ///
    /// # Arguments
    ///
    /// * `layout` - Segment offsets.
    /// * `instruction_count` - Length of the program; the static data segment
    ///   begins right after its last instruction.
    pub fn new(layout: &MemoryConfig, instruction_count: usize) -> Self {
        Self {
            bytes: HashMap::new(),
            text_segment_offset: layout.text_segment_offset,
            static_data_offset: layout.text_segment_offset
                + instruction_count as u64 * INSTRUCTION_SIZE,
            dynamic_data_offset: layout.dynamic_data_offset,
            stack_base: layout.stack_base,
        }
    }

    /// Base address of the text segment.
    pub const fn text_segment_offset(&self) -> u64 {
        self.text_segment_offset
    }

    /// First address past the last instruction.
    pub const fn static_data_offset(&self) -> u64 {
        self.static_data_offset
    }

    /// Lowest valid data address.
    pub const fn dynamic_data_offset(&self) -> u64 {
        self.dynamic_data_offset
    }

    /// Exclusive upper bound of valid data addresses.
    pub const fn stack_base(&self) -> u64 {
        self.stack_base
    }

    /// Checks that `[addr, addr + size)` lies in the data window.
    fn check(&self, addr: u64, size: u64) -> Result<(), RuntimeFault> {
        if addr < self.dynamic_data_offset || addr > self.stack_base.saturating_sub(size) {
            return Err(RuntimeFault::SegmentFault { address: addr, segment: Segment::StackOrHeap });
        }
        Ok(())
    }

    /// Loads `size` bytes, zero-extended.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the most significant byte.
    /// * `size` - Access width in bytes (1, 2, 4, or 8).
    pub fn load(&self, addr: u64, size: u64) -> Result<u64, RuntimeFault> {
        self.check(addr, size)?;
        let bytes: Vec<u8> =
            (addr..addr + size).map(|a| self.bytes.get(&a).copied().unwrap_or(0)).collect();
        let value = ByteBuffer::from_tail(&bytes).value();
        trace!(addr = format_args!("{addr:#x}"), size, value = format_args!("{value:#x}"), "load");
        Ok(value)
    }

    /// Stores the low `size` bytes of `value`.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the most significant byte.
    /// * `value` - Value whose low bytes are written.
    /// * `size` - Access width in bytes (1, 2, 4, or 8).
    pub fn store(&mut self, addr: u64, value: u64, size: u64) -> Result<(), RuntimeFault> {
        self.check(addr, size)?;
        let buf = ByteBuffer::from_value(value);
        for (a, byte) in (addr..).zip(buf.tail(size as usize)) {
            let _ = self.bytes.insert(a, *byte);
        }
        trace!(addr = format_args!("{addr:#x}"), size, value = format_args!("{value:#x}"), "store");
        Ok(())
    }

    /// Loads a doubleword.
    pub fn load_doubleword(&self, addr: u64) -> Result<u64, RuntimeFault> {
        self.load(addr, DOUBLEWORD)
    }

    /// Loads a word, zero-extended.
    pub fn load_word(&self, addr: u64) -> Result<u64, RuntimeFault> {
        self.load(addr, WORD)
    }

    /// Loads a word, sign-extended to 64 bits.
    pub fn load_signed_word(&self, addr: u64) -> Result<u64, RuntimeFault> {
        Ok(self.load(addr, WORD)? as u32 as i32 as i64 as u64)
    }

    /// Loads a halfword, zero-extended.
    pub fn load_halfword(&self, addr: u64) -> Result<u64, RuntimeFault> {
        self.load(addr, HALFWORD)
    }

    /// Loads a byte, zero-extended.
    pub fn load_byte(&self, addr: u64) -> Result<u64, RuntimeFault> {
        self.load(addr, BYTE)
    }

    /// Stores a doubleword.
    pub fn store_doubleword(&mut self, addr: u64, value: u64) -> Result<(), RuntimeFault> {
        self.store(addr, value, DOUBLEWORD)
    }

    /// Stores the low word of `value`.
    pub fn store_word(&mut self, addr: u64, value: u64) -> Result<(), RuntimeFault> {
        self.store(addr, value, WORD)
    }

    /// Stores the low halfword of `value`.
    pub fn store_halfword(&mut self, addr: u64, value: u64) -> Result<(), RuntimeFault> {
        self.store(addr, value, HALFWORD)
    }

    /// Stores the low byte of `value`.
    pub fn store_byte(&mut self, addr: u64, value: u64) -> Result<(), RuntimeFault> {
        self.store(addr, value, BYTE)
    }

    /// Reads one byte without a bounds check, for inspection.
    pub fn peek(&self, addr: u64) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    /// Number of bytes that have been written.
    pub fn footprint(&self) -> usize {
        self.bytes.len()
    }
}
