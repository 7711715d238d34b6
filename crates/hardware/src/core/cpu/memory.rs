//! Memory Access Helpers.
//!
//! This module provides the interface between the CPU and the data memory.
//! It performs the following:
//! 1. **Address Generation:** Base register plus signed offset, with wrapping.
//! 2. **SP Discipline:** Faults data transfers based on a misaligned SP.
//! 3. **Exclusive Monitor Upkeep:** Clears the `LDXR` tag when a store overlaps it.

use super::Cpu;
use crate::common::constants::SP_ALIGNMENT;
use crate::common::RuntimeFault;
use crate::isa::abi::SP;
use crate::memory::Memory;

impl Cpu {
    /// Computes the effective address of a data transfer.
    ///
    /// # Arguments
    ///
    /// * `base` - Base register index.
    /// * `offset` - Signed byte offset.
    ///
    /// # Returns
    ///
    /// The address, or `SpAlignment` if `base` is SP and SP is not quadword aligned.
    pub(crate) fn effective_address(
        &mut self,
        base: usize,
        offset: i64,
    ) -> Result<u64, RuntimeFault> {
        let base_value = self.regs.read(base);
        if base == SP {
            if base_value % SP_ALIGNMENT != 0 {
                self.note("SP misaligned");
                return Err(RuntimeFault::SpAlignment(base_value));
            }
            self.note("SP aligned correctly");
        }
        Ok(base_value.wrapping_add(offset as u64))
    }

    /// Stores `size` bytes and clears an overlapping exclusive tag.
    ///
    /// # Arguments
    ///
    /// * `memory` - Data memory.
    /// * `addr` - First byte to write.
    /// * `value` - Value whose low `size` bytes are written.
    /// * `size` - Access width in bytes.
    /// * `tag_span` - Width used for the overlap test against the tag.
    pub(crate) fn store_data(
        &mut self,
        memory: &mut Memory,
        addr: u64,
        value: u64,
        size: u64,
        tag_span: u64,
    ) -> Result<(), RuntimeFault> {
        memory.store(addr, value, size)?;
        if self.monitor.clear_if_overlaps(addr, tag_span) {
            self.note("Exclusive access address tag cleared");
        }
        Ok(())
    }
}
